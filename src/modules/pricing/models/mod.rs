mod fee_model;
mod pricing_result;

pub use fee_model::{
    DocumentationFee, FeeModel, ProcessingFee, DOCUMENTATION_FEE_LABEL, PROCESSING_FEE_LABEL,
};
pub use pricing_result::{FeeLine, PricingResult};
