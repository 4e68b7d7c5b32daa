//! Prompt construction for text and image generation.
//!
//! Every function here is deterministic: the same inputs always produce the
//! same instruction string. Missing optional product fields are substituted
//! with "UNKNOWN" placeholders that tell the model to infer them from the
//! attached image, never with an error.

use std::fmt::Write;

use crate::tone::Tone;

/// Per-product input to [`build_generation_prompt`].
///
/// `image_url` is mandatory (every product has a photo); the rest may be
/// absent and inferred by the model.
#[derive(Debug, Clone)]
pub struct ProductPromptInput {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
}

/// Build the marketing-copy instruction block covering all `products`.
///
/// The block states campaign context, enumerates each product by position
/// (with infer-from-image placeholders for missing fields), and spells out
/// the strict JSON response contract the validator in [`crate::output`]
/// expects: per-product copy for four channels plus a campaign-level
/// master copy.
pub fn build_generation_prompt(products: &[ProductPromptInput], tone: Tone, theme: &str) -> String {
    let mut product_lines = String::new();
    for (i, p) in products.iter().enumerate() {
        if i > 0 {
            product_lines.push_str("\n\n");
        }
        let _ = write!(
            product_lines,
            "Product {n}:\n\
             - Name: {name}\n\
             - Price: {price}\n\
             - Description: {description}",
            n = i + 1,
            name = p.name.as_deref().unwrap_or("UNKNOWN - infer from image"),
            price = p
                .price
                .as_deref()
                .unwrap_or("UNKNOWN - estimate from image quality and style"),
            description = p
                .description
                .as_deref()
                .unwrap_or("UNKNOWN - describe from image"),
        );
    }

    format!(
        "You are an expert jewelry marketing copywriter with deep knowledge of social media algorithms.\n\
         \n\
         CAMPAIGN CONTEXT:\n\
         - Theme: {theme}\n\
         - Tone: {tone} ({voice})\n\
         - Products count: {count}\n\
         \n\
         TASK: For each product image provided (in order), generate complete marketing content.\n\
         \n\
         {product_lines}\n\
         \n\
         RESPONSE FORMAT (strict JSON, no markdown, no explanation):\n\
         {{\n\
           \"products\": [\n\
             {{\n\
               \"inferredName\": \"string (if name was unknown, provide best guess; else repeat given name)\",\n\
               \"inferredDescription\": \"string (2-3 sentences about the product)\",\n\
               \"estimatedPrice\": \"string (e.g. '$89' or '$120-$150')\",\n\
               \"priceConfidence\": \"high|medium|low\",\n\
               \"captions\": {{\n\
                 \"instagram\": \"string (1-3 sentences, emoji-rich, lifestyle-focused, ends with soft CTA)\",\n\
                 \"facebook\": \"string (2-4 sentences, story-driven, community-focused, includes price mention)\",\n\
                 \"tiktok\": \"string (punchy, trend-aware, very short, max 150 chars, hook-first)\",\n\
                 \"whatsapp\": \"string (conversational, persuasive, highly shareable, natural sounding for direct messages/status, emoji-rich)\"\n\
               }},\n\
               \"hashtags\": [\"tag1\", \"tag2\", ... (15-20 tags, mix of niche and trending, no # prefix)]\n\
             }}\n\
           ],\n\
           \"masterCopy\": {{\n\
             \"captions\": {{ \"instagram\": \"string\", \"facebook\": \"string\", \"tiktok\": \"string\", \"whatsapp\": \"string\" }},\n\
             \"hashtags\": [\"tag1\", \"tag2\", ...]\n\
           }}\n\
         }}",
        theme = theme,
        tone = tone.as_str(),
        voice = tone.voice(),
        count = products.len(),
        product_lines = product_lines,
    )
}

/// Build the instruction for one promotional product image.
///
/// The caption currently steers nothing in the rendered scene directly, but
/// is kept in the signature so future prompt revisions can weave it in
/// without touching call sites.
pub fn build_image_prompt(product_name: &str, tone: Tone, _caption: &str, description: &str) -> String {
    let details = if description.is_empty() {
        String::new()
    } else {
        format!("Product details: {description}. ")
    };
    format!(
        "A stunning professional jewelry product advertisement photograph. The jewelry piece \
         shown is: \"{product_name}\". {details}Visual style: {style}. The image should be \
         optimized for social media marketing, with the jewelry as the hero element. Shot in \
         the style of a luxury fashion brand campaign. Ultra high resolution, photorealistic, \
         no text or watermarks.",
        style = tone.visual_style(),
    )
}

/// Build the instruction for the campaign-level hero image.
///
/// Unlike [`build_image_prompt`] this describes a poster conceptually
/// featuring multiple pieces from the theme, not a single product.
pub fn build_campaign_hero_image_prompt(theme: &str, tone: Tone) -> String {
    format!(
        "A stunning professional hero campaign image representing a jewelry collection. The \
         theme of the campaign is: \"{theme}\". Visual style: {style}. The image should \
         conceptually feature multiple elegant jewelry pieces beautifully arranged together to \
         form a cohesive promotional poster or hero asset. Shot in the style of a luxury \
         fashion brand campaign. Ultra high resolution, photorealistic, visually captivating, \
         no text or watermarks.",
        style = tone.visual_style(),
    )
}

/// Build the steering block appended to a regeneration prompt.
///
/// With a caller-supplied hint the model is told to make the variation
/// distinctly different from previous ones; without one it gets a generic
/// fresh-angle instruction carrying the variation number.
pub fn variation_instruction(hint: Option<&str>, next_variation: i32) -> String {
    match hint {
        Some(hint) => format!(
            "\n\nVARIATION INSTRUCTION: {hint}. Make this variation distinctly different from previous ones."
        ),
        None => format!(
            "\n\nVARIATION INSTRUCTION: Generate variation #{next_variation}. Use a fresh creative angle."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: Option<&str>, price: Option<&str>, description: Option<&str>) -> ProductPromptInput {
        ProductPromptInput {
            name: name.map(String::from),
            price: price.map(String::from),
            description: description.map(String::from),
            image_url: "https://img.example/ring.jpg".to_string(),
        }
    }

    #[test]
    fn generation_prompt_is_deterministic() {
        let products = vec![product(Some("Aurora Ring"), Some("$120"), None)];
        let a = build_generation_prompt(&products, Tone::Luxury, "vintage gold");
        let b = build_generation_prompt(&products, Tone::Luxury, "vintage gold");
        assert_eq!(a, b);
    }

    #[test]
    fn generation_prompt_substitutes_unknown_placeholders() {
        let products = vec![product(None, None, None)];
        let prompt = build_generation_prompt(&products, Tone::Minimal, "everyday silver");
        assert!(prompt.contains("Name: UNKNOWN - infer from image"));
        assert!(prompt.contains("Price: UNKNOWN - estimate from image quality and style"));
        assert!(prompt.contains("Description: UNKNOWN - describe from image"));
    }

    #[test]
    fn generation_prompt_enumerates_products_in_order() {
        let products = vec![
            product(Some("First"), None, None),
            product(Some("Second"), None, None),
            product(Some("Third"), None, None),
        ];
        let prompt = build_generation_prompt(&products, Tone::Bold, "statement pieces");
        let p1 = prompt.find("Product 1:").unwrap();
        let p2 = prompt.find("Product 2:").unwrap();
        let p3 = prompt.find("Product 3:").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert!(prompt.contains("Products count: 3"));
    }

    #[test]
    fn generation_prompt_states_context_and_contract() {
        let products = vec![product(Some("Halo Pendant"), Some("$95"), Some("14k gold"))];
        let prompt = build_generation_prompt(&products, Tone::Trendy, "summer brights");
        assert!(prompt.contains("Theme: summer brights"));
        assert!(prompt.contains("Tone: Trendy"));
        assert!(prompt.contains(Tone::Trendy.voice()));
        // The strict response contract must name every schema field.
        for field in [
            "\"inferredName\"",
            "\"inferredDescription\"",
            "\"estimatedPrice\"",
            "\"priceConfidence\"",
            "\"instagram\"",
            "\"facebook\"",
            "\"tiktok\"",
            "\"whatsapp\"",
            "\"hashtags\"",
            "\"masterCopy\"",
        ] {
            assert!(prompt.contains(field), "contract missing {field}");
        }
        assert!(prompt.contains("no # prefix"));
        assert!(prompt.contains("max 150 chars"));
    }

    #[test]
    fn image_prompt_embeds_name_style_and_bans_text() {
        let prompt = build_image_prompt("Aurora Ring", Tone::Luxury, "caption", "hand-set opal");
        assert!(prompt.contains("\"Aurora Ring\""));
        assert!(prompt.contains("Product details: hand-set opal."));
        assert!(prompt.contains(Tone::Luxury.visual_style()));
        assert!(prompt.contains("no text or watermarks"));
    }

    #[test]
    fn image_prompt_omits_details_when_description_empty() {
        let prompt = build_image_prompt("Aurora Ring", Tone::Bold, "", "");
        assert!(!prompt.contains("Product details:"));
    }

    #[test]
    fn hero_prompt_is_collection_scoped() {
        let prompt = build_campaign_hero_image_prompt("vintage gold", Tone::Minimal);
        assert!(prompt.contains("\"vintage gold\""));
        assert!(prompt.contains("multiple elegant jewelry pieces"));
        assert!(prompt.contains(Tone::Minimal.visual_style()));
        assert!(prompt.contains("no text or watermarks"));
    }

    #[test]
    fn variation_instruction_with_hint() {
        let text = variation_instruction(Some("make it moodier"), 4);
        assert!(text.contains("make it moodier"));
        assert!(text.contains("distinctly different from previous ones"));
        assert!(!text.contains("#4"));
    }

    #[test]
    fn variation_instruction_generic_names_the_number() {
        let text = variation_instruction(None, 3);
        assert!(text.contains("variation #3"));
        assert!(text.contains("fresh creative angle"));
    }
}
