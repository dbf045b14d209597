use crate::options::RenderOptions;

pub const REFLECTIONS_ON: &str =
    "Include realistic, high-fidelity reflections on the product surface.";
pub const REFLECTIONS_OFF: &str =
    "The product should have a matte finish, with no direct or specular reflections.";
pub const NO_WATERMARK: &str = "Do not add any watermark.";

fn reflection_clause(reflections: bool) -> &'static str {
    if reflections {
        REFLECTIONS_ON
    } else {
        REFLECTIONS_OFF
    }
}

fn watermark_clause(text: &str) -> String {
    if text.is_empty() {
        NO_WATERMARK.to_string()
    } else {
        format!(
            "Add a subtle, professional text watermark in the bottom-right corner with the text: \"{}\".",
            text
        )
    }
}

/// Builds the instruction sent alongside the product photo.
///
/// User text (scenario, watermark) is embedded verbatim; the same options
/// always produce the same string.
pub fn build_prompt(options: &RenderOptions) -> String {
    format!(
        r#"You are an art director and 3D rendering specialist, focused on creating photorealistic product visualizations for marketing and e-commerce. Your attention to detail is impeccable, and your goal is to produce an image indistinguishable from a professional photograph.

# Main Task
Generate a SINGLE high-quality, photorealistic 3D product image from the provided 2D product image.

# Product Context
- Category: {category}
- 2D Reference Image: [Attached]

# Step-by-Step Process
Follow these steps rigorously:

1.  **3D Analysis and Modeling:**
    - Analyze the attached 2D image to fully understand the product's geometry, proportions, materials, textures, and branding.
    - Create a digitally accurate 3D model. Fidelity to the original product is the most important criterion.

2.  **Scene Composition:**
    - **Positioning:** Render the 3D model at the specified viewing angle.
    - **Rotation Angle (Y-Axis):** {angle} degrees.
    - **Scenario:** Place the 3D model in the following environment: "{scenario}". The scenario should complement the product, never overshadow it. The primary focus is the product.

3.  **Lighting and Rendering:**
    - **Lighting Style:** Apply a professional "{lighting}" lighting scheme. The lighting should realistically highlight the product's contours and textures.
    - **Surface Effects:** {reflections} Any surface effects should be subtle and physically accurate, corresponding to the lighting and environment.

4.  **Finalization and Details:**
    - **Output Quality:** The final image must be rendered in the highest quality, with sharp details and no digital artifacts, suitable for a {resolution} resolution.
    - {watermark}

# Critical Rules and Restrictions
- **IMAGE ONLY:** The only allowed output is the final image. DO NOT include text, captions, explanations, code, or anything else in your response. The response must be only the image content.
- **NO DISTORTION:** Do not alter the original product's design, colors, or branding.
- **PHOTOREALISM:** The final result must look like a real photograph, not an obvious computer rendering.
"#,
        category = options.category,
        angle = options.angle,
        scenario = options.mockup_style,
        lighting = options.lighting,
        reflections = reflection_clause(options.reflections),
        resolution = options.resolution,
        watermark = watermark_clause(&options.watermark_text),
    )
}
