use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEXT_GENERATION_METHOD: &str = "generateContent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub version: Option<String>,
    pub input_limit: Option<u64>,
    pub output_limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    pub count: usize,
    pub models: Vec<ModelDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelListing {
    Filtered(ModelList),
    Passthrough(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorModel {
    name: Option<String>,
    display_name: Option<String>,
    version: Option<String>,
    input_token_limit: Option<u64>,
    output_token_limit: Option<u64>,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl VendorModel {
    fn generates_text(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == TEXT_GENERATION_METHOD)
    }
}

impl From<VendorModel> for ModelDescriptor {
    fn from(model: VendorModel) -> Self {
        Self {
            name: model.name,
            display_name: model.display_name,
            version: model.version,
            input_limit: model.input_token_limit,
            output_limit: model.output_token_limit,
        }
    }
}

impl ModelListing {
    // Anything without a `models` list (usually a vendor error) passes through
    pub fn from_payload(mut payload: Value) -> Result<Self, serde_json::Error> {
        let models = match payload.get_mut("models") {
            Some(models) if !models.is_null() => models.take(),
            _ => return Ok(ModelListing::Passthrough(payload)),
        };

        let models: Vec<ModelDescriptor> = serde_json::from_value::<Vec<VendorModel>>(models)?
            .into_iter()
            .filter(VendorModel::generates_text)
            .map(ModelDescriptor::from)
            .collect();

        Ok(ModelListing::Filtered(ModelList {
            count: models.len(),
            models,
        }))
    }
}
