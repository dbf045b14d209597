use crate::constants::{CMD_ANALYZE, CMD_PROMPT, CMD_RENDER};
use crate::error::{RenderError, Result};
use crate::options::{parse_flag, RenderOptions};
use crate::prompt::build_prompt;
use crate::session::Session;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

/// Settings parsed from trailing `key=value` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub overrides: Vec<(String, String)>,
    pub analyze: bool,
    pub out: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            overrides: Vec::new(),
            analyze: true,
            out: None,
        }
    }
}

pub fn parse_settings(args: &[String]) -> Result<RunSettings> {
    let mut settings = RunSettings::default();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            RenderError::Validation(format!("expected key=value, got \"{}\"", arg))
        })?;
        match key {
            "analyze" => settings.analyze = parse_flag(key, value)?,
            "out" => settings.out = Some(PathBuf::from(value)),
            _ => settings.overrides.push((key.to_string(), value.to_string())),
        }
    }
    Ok(settings)
}

pub fn apply_overrides(options: &mut RenderOptions, overrides: &[(String, String)]) -> Result<()> {
    for (key, value) in overrides {
        options.set(key, value)?;
    }
    Ok(())
}

fn print_options(options: &RenderOptions) {
    println!("  {} {}", "category:".bold(), options.category);
    println!("  {} {}°", "angle:".bold(), options.angle);
    println!("  {} {}", "scene:".bold(), options.mockup_style);
    println!("  {} {}", "lighting:".bold(), options.lighting);
    println!("  {} {}", "reflections:".bold(), options.reflections);
    println!("  {} {}", "resolution:".bold(), options.resolution);
    if options.has_watermark() {
        println!("  {} {}", "watermark:".bold(), options.watermark_text);
    }
}

fn image_arg(args: &[String]) -> Result<&str> {
    args.get(2)
        .map(String::as_str)
        .ok_or_else(|| RenderError::Validation("missing <image_path> argument".into()))
}

pub fn run_prompt(args: &[String]) -> Result<()> {
    let settings = parse_settings(args.get(2..).unwrap_or(&[]))?;
    let mut options = RenderOptions::default();
    apply_overrides(&mut options, &settings.overrides)?;
    options.validate()?;
    println!("{}", build_prompt(&options));
    Ok(())
}

pub async fn run_analyze(session: &Session, args: &[String]) -> Result<()> {
    if let Some(err) = session.configuration_error() {
        return Err(err);
    }
    session.upload_file(image_arg(args)?)?;

    let spinner = create_spinner("magenta", "Analyzing product...".to_string());
    let result = session.analyze().await;
    spinner.finish_and_clear();

    match result {
        Some(analysis) => {
            println!("{}", "Suggested settings".magenta().bold());
            println!("  {} {}", "category:".bold(), analysis.category);
            println!("  {} {}", "scene:".bold(), analysis.mockup_style);
        }
        None => println!(
            "{}",
            "Could not analyze the product; defaults are unchanged.".yellow()
        ),
    }
    Ok(())
}

pub async fn run_render(session: &Session, args: &[String]) -> Result<PathBuf> {
    if let Some(err) = session.configuration_error() {
        return Err(err);
    }
    session.upload_file(image_arg(args)?)?;
    let settings = parse_settings(args.get(3..).unwrap_or(&[]))?;

    // Overrides must parse and pass range checks before any request is made.
    let mut checked = session.options();
    apply_overrides(&mut checked, &settings.overrides)?;
    checked.validate()?;

    if settings.analyze {
        let spinner = create_spinner("magenta", "Analyzing product...".to_string());
        let _ = session.analyze().await;
        spinner.finish_and_clear();
    }

    let mut options = session.options();
    apply_overrides(&mut options, &settings.overrides)?;
    session.set_options(options.clone());

    println!("{}", "Rendering with".cyan().bold());
    print_options(&options);

    let spinner = create_spinner("cyan", "Generating render...".to_string());
    let outcome = session.generate().await;
    spinner.finish_and_clear();
    let image = outcome?;

    let out = settings
        .out
        .unwrap_or_else(|| PathBuf::from(format!("render.{}", image.extension())));
    if out.as_os_str() == "-" {
        println!("{}", image.to_data_uri());
        return Ok(out);
    }
    image.save(&out)?;
    println!(
        "{} {} ({} bytes)",
        "Saved".green().bold(),
        out.display(),
        image.data.len()
    );
    Ok(out)
}

pub async fn process_command(session: &Session, args: &[String]) -> Result<()> {
    match args[1].as_str() {
        CMD_PROMPT => run_prompt(args),
        CMD_ANALYZE => run_analyze(session, args).await,
        CMD_RENDER => run_render(session, args).await.map(|_| ()),
        other => Err(RenderError::Validation(format!(
            "unknown command \"{}\" (try -h)",
            other
        ))),
    }
}
