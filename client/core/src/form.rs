//! Form state captured at submit time

use std::fmt;

use serde::{Deserialize, Serialize};

/// A form and the feedback area it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormId {
    /// Search client by name
    Search,
    /// Credit score lookup
    Score,
    /// Delete client
    Delete,
    /// Update account balance
    Balance,
    /// Register client
    Register,
    /// Get client by document
    ClientLookup,
    /// Get account number by document
    AccountLookup,
    /// Investor portal access
    InvestorAccess,
    /// New investment
    Investment,
}

impl FormId {
    /// Every form, in page order
    pub const ALL: [FormId; 9] = [
        FormId::Search,
        FormId::Score,
        FormId::Delete,
        FormId::Balance,
        FormId::Register,
        FormId::ClientLookup,
        FormId::AccountLookup,
        FormId::InvestorAccess,
        FormId::Investment,
    ];

    /// Id of the feedback area owned by this form
    pub fn feedback_id(&self) -> &'static str {
        match self {
            FormId::Search => "output",
            FormId::Score => "resScore",
            FormId::Delete => "resExcluir",
            FormId::Balance => "resSaldo",
            FormId::Register => "resCadastro",
            FormId::ClientLookup => "resBusca",
            FormId::AccountLookup => "resConta",
            FormId::InvestorAccess => "resAcesso",
            FormId::Investment => "resInvestimento",
        }
    }

    /// Modal hosting this form
    pub fn modal(&self) -> &'static str {
        match self {
            FormId::Search => "modalBusca",
            FormId::Score => "modalScore",
            FormId::Delete => "modalExcluir",
            FormId::Balance => "modalSaldo",
            FormId::Register => "modalCadastro",
            FormId::ClientLookup => "modalBuscaDoc",
            FormId::AccountLookup => "modalConta",
            FormId::InvestorAccess => "modalAcesso",
            FormId::Investment => "modalInvestimento",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feedback_id())
    }
}

/// Field groups shown or hidden by a registration toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    /// `extra_banco`, driven by the correntista toggle
    Banking,
    /// `extra_investimento`, driven by the investidor toggle
    Investing,
}

impl FieldGroup {
    /// Element id of the group
    pub fn id(&self) -> &'static str {
        match self {
            FieldGroup::Banking => "extra_banco",
            FieldGroup::Investing => "extra_investimento",
        }
    }
}

/// Registration form toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    /// `is_correntista`
    Correntista,
    /// `is_investidor`
    Investidor,
}

impl Toggle {
    /// Group whose visibility follows this toggle
    pub fn group(&self) -> FieldGroup {
        match self {
            Toggle::Correntista => FieldGroup::Banking,
            Toggle::Investidor => FieldGroup::Investing,
        }
    }
}

/// Registration form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub nome: String,
    pub telefone: String,
    pub documento: String,
    pub correntista: bool,
    pub investidor: bool,
    /// Only sent when `investidor` is on
    pub email: String,
    /// Only sent when `investidor` is on
    pub patrimonio: String,
    /// Only sent when `investidor` is on
    pub perfil: String,
}

/// New investment form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentForm {
    pub documento: String,
    pub tipo: String,
    pub valor_investido: String,
    pub ativo: bool,
    /// Required unless `tipo` is fixed income
    pub ticker: String,
}

/// A submitted form with the raw values read from its controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Submission {
    SearchByName { nome: String },
    CreditScore { documento: String },
    DeleteClient { documento: String },
    UpdateBalance { conta: String, novo_saldo: String },
    Register(RegistrationForm),
    ClientLookup { documento: String },
    AccountLookup { documento: String },
    InvestorAccess { documento: String },
    NewInvestment(InvestmentForm),
}

impl Submission {
    /// Form that produced this submission
    pub fn form(&self) -> FormId {
        match self {
            Submission::SearchByName { .. } => FormId::Search,
            Submission::CreditScore { .. } => FormId::Score,
            Submission::DeleteClient { .. } => FormId::Delete,
            Submission::UpdateBalance { .. } => FormId::Balance,
            Submission::Register(_) => FormId::Register,
            Submission::ClientLookup { .. } => FormId::ClientLookup,
            Submission::AccountLookup { .. } => FormId::AccountLookup,
            Submission::InvestorAccess { .. } => FormId::InvestorAccess,
            Submission::NewInvestment(_) => FormId::Investment,
        }
    }
}

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Flag(bool),
}

impl FormValue {
    /// Query-string form of the value
    pub fn as_query_value(&self) -> String {
        match self {
            FormValue::Text(s) => s.clone(),
            FormValue::Flag(b) => b.to_string(),
        }
    }
}

/// Ordered parameters serialized from a form.
///
/// Built fresh for every submission and dropped once sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRequest {
    fields: Vec<(&'static str, FormValue)>,
}

impl FormRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field, replacing any previous value
    pub fn text(self, name: &'static str, value: impl Into<String>) -> Self {
        self.with(name, FormValue::Text(value.into()))
    }

    /// Add a boolean field, replacing any previous value
    pub fn flag(self, name: &'static str, value: bool) -> Self {
        self.with(name, FormValue::Flag(value))
    }

    fn with(mut self, name: &'static str, value: FormValue) -> Self {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    /// Parameters as query-string pairs
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|(n, v)| (*n, v.as_query_value()))
            .collect()
    }
}

/// Canonical form of a national document identifier: digits only.
pub fn normalize_document(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
