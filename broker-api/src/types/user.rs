use serde::{Deserialize, Serialize};

use super::enums::RecordStatus;

/// A registered user and their full KYC profile, as serialized by the API.
///
/// Only `status` is ever mutated through the back office (via the review
/// endpoints); every other field is display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    pub status: RecordStatus,

    // Personal data
    pub full_name: Option<String>,
    /// Date of birth as YYYY-MM-DD.
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub naturalness: Option<String>,
    pub cpf: Option<String>,

    // Identification documents (URLs)
    pub rg_cnh_front: Option<String>,
    pub rg_cnh_back: Option<String>,
    pub selfie_with_doc: Option<String>,
    pub proof_of_residence: Option<String>,

    // Financial profile
    pub occupation: Option<String>,
    pub company_name: Option<String>,
    pub monthly_income: Option<f64>,
    pub estimated_wealth: Option<f64>,
    pub source_of_income: Option<String>,
    #[serde(default)]
    pub licit_resources_declaration: bool,

    // Bank details
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    /// "current" or "savings".
    pub account_type: Option<String>,
    /// "own" or "third_party".
    pub account_ownership: Option<String>,

    // Investor profile (suitability)
    pub investment_objective: Option<String>,
    pub risk_tolerance: Option<String>,
    pub investment_knowledge: Option<String>,
    /// Comma-separated values.
    pub investment_types: Option<String>,

    // Consents
    #[serde(default)]
    pub terms_of_use_accepted: bool,
    #[serde(default)]
    pub privacy_policy_accepted: bool,
    #[serde(default)]
    pub lgpd_accepted: bool,
    #[serde(default)]
    pub marketing_consent: bool,
}

/// A new-account application submitted to `/api/register`.
///
/// Everything except email and password is optional; the server stores
/// whatever was provided and parks the application as pending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,

    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub naturalness: Option<String>,
    pub cpf: Option<String>,

    pub rg_cnh_front: Option<String>,
    pub rg_cnh_back: Option<String>,
    pub selfie_with_doc: Option<String>,
    pub proof_of_residence: Option<String>,

    pub occupation: Option<String>,
    pub company_name: Option<String>,
    pub monthly_income: Option<f64>,
    pub estimated_wealth: Option<f64>,
    pub source_of_income: Option<String>,
    pub licit_resources_declaration: bool,

    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub account_type: Option<String>,
    pub account_ownership: Option<String>,

    pub investment_objective: Option<String>,
    pub risk_tolerance: Option<String>,
    pub investment_knowledge: Option<String>,
    pub investment_types: Option<String>,

    pub terms_of_use_accepted: bool,
    pub privacy_policy_accepted: bool,
    pub lgpd_accepted: bool,
    pub marketing_consent: bool,
}
