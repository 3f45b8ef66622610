//! Response types (Serialize)

use fauna_core::AnimalRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub success: bool,
    pub data: Vec<AnimalRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
