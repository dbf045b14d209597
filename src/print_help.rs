use crate::options::{Category, Lighting, Resolution};
use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " PRODSHOT ".yellow());
    println!("Usage:");
    println!("  {} <command> [arguments]", "prodshot".bold().green());
    println!("\nCommands:");
    println!(
        "  {}   Print the render prompt for the given options.",
        "p".bold().cyan()
    );
    println!(
        "  {}   Analyze a product photo and suggest a category and scene.",
        "a".bold().magenta()
    );
    println!(
        "  {}   Render a product photo into a photorealistic 3D scene.",
        "r".bold().red()
    );
    println!(
        "  {}     Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nArguments:");
    println!("  {}", "p [key=value ...]".bold().cyan());
    println!("  {}", "a <image_path>".bold().magenta());
    println!("  {}", "r <image_path> [key=value ...]".bold().red());
    println!("\nOptions (key=value):");
    println!("  category     {}", Category::labels().join(" | "));
    println!("  angle        0-360");
    println!("  style        free text scene description");
    println!("  lighting     {}", Lighting::labels().join(" | "));
    println!("  reflections  true | false");
    println!("  resolution   {}", Resolution::labels().join(" | "));
    println!("  watermark    text, empty for none");
    println!("  analyze      true | false (r only, default true)");
    println!("  out          output path, - prints a data URI (r only, default render.<ext>)");
    println!("\nExamples:");
    println!(
        "  {} angle=90 \"style=On a wooden desk\"",
        "prodshot p".bold().cyan()
    );
    println!("  {} bottle.png", "prodshot a".bold().magenta());
    println!(
        "  {} bottle.png lighting=Cinematic reflections=false watermark=Acme",
        "prodshot r".bold().red()
    );
    println!("\nThe API key is read from API_KEY, falling back to GEMINI_API_KEY.");
    println!("{:━^60}", "".yellow());
}
