//! Schema for the model's marketing-copy response, plus deterministic
//! fallbacks.
//!
//! Validation is a single strict gate: the raw response either deserializes
//! into [`GenerationOutput`] in full, or the whole payload is rejected and
//! the caller substitutes fallback content. There is no partial acceptance
//! and no coercion. Unknown extra keys are ignored.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How confident the model is in an estimated price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceConfidence {
    High,
    Medium,
    Low,
}

impl PriceConfidence {
    /// Lowercase wire/database form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceConfidence::High => "high",
            PriceConfidence::Medium => "medium",
            PriceConfidence::Low => "low",
        }
    }
}

/// One caption per publishing channel. All four are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCaptions {
    pub instagram: String,
    pub facebook: String,
    pub tiktok: String,
    pub whatsapp: String,
}

/// Model output for a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOutput {
    pub inferred_name: String,
    pub inferred_description: String,
    pub estimated_price: String,
    pub price_confidence: PriceConfidence,
    pub captions: ChannelCaptions,
    pub hashtags: Vec<String>,
}

/// Campaign-level copy reusable across every product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterCopy {
    pub captions: ChannelCaptions,
    pub hashtags: Vec<String>,
}

/// The complete expected response: one entry per input product, in input
/// order, plus the campaign master copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub products: Vec<ProductOutput>,
    pub master_copy: MasterCopy,
}

/// Parse and validate a raw model response.
///
/// Any missing field, wrong type, or out-of-range `priceConfidence` fails
/// the whole payload.
pub fn parse_output(raw: &str) -> Result<GenerationOutput, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Model response failed validation: {e}")))
}

/// Generic noun phrase used when a product has no name to interpolate.
const FALLBACK_NAME: &str = "this beautiful piece";

/// Hashtag set attached to every fallback generation.
const FALLBACK_HASHTAGS: [&str; 15] = [
    "jewelry",
    "luxuryjewelry",
    "jewelrylover",
    "accessories",
    "style",
    "fashion",
    "handmade",
    "gold",
    "silver",
    "rings",
    "necklace",
    "earrings",
    "jewels",
    "bling",
    "fashionista",
];

/// Build a complete, schema-valid substitute for one product.
///
/// Used whenever the model call throws, times out, or its output fails
/// validation, so the pipeline never halts on a bad response. Price
/// confidence is always `low`.
pub fn fallback_product(product_name: Option<&str>) -> ProductOutput {
    let name = product_name.unwrap_or(FALLBACK_NAME);
    ProductOutput {
        inferred_name: name.to_string(),
        inferred_description:
            "A stunning piece of jewelry, crafted with exceptional attention to detail."
                .to_string(),
        estimated_price: "Contact us for pricing".to_string(),
        price_confidence: PriceConfidence::Low,
        captions: ChannelCaptions {
            instagram: format!(
                "✨ Elevate your style with {name}. Each piece tells a story. Shop now through the link in bio! 💍"
            ),
            facebook: format!(
                "Discover {name} — a beautiful addition to any collection. Handcrafted with care and designed to last a lifetime. Visit our store today!"
            ),
            tiktok: "POV: you just found your new favorite jewelry 💍✨ #jewelry #style"
                .to_string(),
            whatsapp: format!(
                "Hey! ✨ You have to check out {name}. It's absolutely stunning! Let me know if you want more details. 💍"
            ),
        },
        hashtags: FALLBACK_HASHTAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// A master copy with every channel blank and no hashtags.
///
/// The fallback asymmetry is deliberate: per-product fallbacks are rich,
/// the campaign-level fallback is empty.
pub fn empty_master_copy() -> MasterCopy {
    MasterCopy {
        captions: ChannelCaptions {
            instagram: String::new(),
            facebook: String::new(),
            tiktok: String::new(),
            whatsapp: String::new(),
        },
        hashtags: Vec::new(),
    }
}

/// Build the whole-campaign substitute: one [`fallback_product`] per input
/// product name plus an [`empty_master_copy`].
pub fn fallback_output<'a, I>(product_names: I) -> GenerationOutput
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    GenerationOutput {
        products: product_names.into_iter().map(fallback_product).collect(),
        master_copy: empty_master_copy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_payload() -> serde_json::Value {
        serde_json::json!({
            "products": [{
                "inferredName": "Aurora Ring",
                "inferredDescription": "An opal ring.",
                "estimatedPrice": "$120",
                "priceConfidence": "high",
                "captions": {
                    "instagram": "ig",
                    "facebook": "fb",
                    "tiktok": "tt",
                    "whatsapp": "wa"
                },
                "hashtags": ["opal", "ring"]
            }],
            "masterCopy": {
                "captions": {
                    "instagram": "ig",
                    "facebook": "fb",
                    "tiktok": "tt",
                    "whatsapp": "wa"
                },
                "hashtags": ["collection"]
            }
        })
    }

    #[test]
    fn parses_a_conformant_payload() {
        let out = parse_output(&valid_payload().to_string()).unwrap();
        assert_eq!(out.products.len(), 1);
        assert_eq!(out.products[0].inferred_name, "Aurora Ring");
        assert_eq!(out.products[0].price_confidence, PriceConfidence::High);
        assert_eq!(out.master_copy.hashtags, vec!["collection"]);
    }

    #[test]
    fn rejects_missing_field() {
        let mut payload = valid_payload();
        payload["products"][0]
            .as_object_mut()
            .unwrap()
            .remove("estimatedPrice");
        assert_matches!(
            parse_output(&payload.to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_missing_caption_channel() {
        let mut payload = valid_payload();
        payload["products"][0]["captions"]
            .as_object_mut()
            .unwrap()
            .remove("whatsapp");
        assert_matches!(
            parse_output(&payload.to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let mut payload = valid_payload();
        payload["products"][0]["priceConfidence"] = serde_json::json!("certain");
        assert_matches!(
            parse_output(&payload.to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_wrong_type() {
        let mut payload = valid_payload();
        payload["products"][0]["hashtags"] = serde_json::json!("not-an-array");
        assert_matches!(
            parse_output(&payload.to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_non_json() {
        assert_matches!(
            parse_output("Sure! Here is your JSON:"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn tolerates_unknown_extra_keys() {
        let mut payload = valid_payload();
        payload["products"][0]["mood"] = serde_json::json!("sparkly");
        assert!(parse_output(&payload.to_string()).is_ok());
    }

    #[test]
    fn fallback_product_is_complete_and_low_confidence() {
        let fb = fallback_product(Some("Aurora Ring"));
        assert_eq!(fb.price_confidence, PriceConfidence::Low);
        assert_eq!(fb.hashtags.len(), 15);
        assert!(fb.captions.instagram.contains("Aurora Ring"));
        assert!(fb.captions.facebook.contains("Aurora Ring"));
        assert!(fb.captions.whatsapp.contains("Aurora Ring"));
        assert!(!fb.captions.tiktok.is_empty());
    }

    #[test]
    fn fallback_product_uses_generic_phrase_without_name() {
        let fb = fallback_product(None);
        assert_eq!(fb.inferred_name, "this beautiful piece");
        assert!(fb.captions.instagram.contains("this beautiful piece"));
    }

    #[test]
    fn fallback_is_schema_valid_after_roundtrip() {
        let fb = fallback_output([Some("A"), None]);
        let raw = serde_json::to_string(&fb).unwrap();
        let reparsed = parse_output(&raw).unwrap();
        assert_eq!(reparsed.products.len(), 2);
    }

    #[test]
    fn campaign_fallback_master_copy_is_empty() {
        let fb = fallback_output([Some("A"), Some("B"), None]);
        assert_eq!(fb.products.len(), 3);
        assert!(fb.master_copy.captions.instagram.is_empty());
        assert!(fb.master_copy.captions.facebook.is_empty());
        assert!(fb.master_copy.captions.tiktok.is_empty());
        assert!(fb.master_copy.captions.whatsapp.is_empty());
        assert!(fb.master_copy.hashtags.is_empty());
    }
}
