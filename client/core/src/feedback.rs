//! Response Normalizer
//!
//! Maps whatever came back for a form to the text, tone and follow-up
//! effect of that form's feedback area. Server responses are not
//! self-describing, so the exact field names read here are part of the
//! wire contract.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::form::FormId;
use crate::transport::{ApiResult, Failure, FailureCode};

/// Key of the account number lookup response, trailing colon and space
/// included: `{"Conta: ": "4521-9"}`.
pub const ACCOUNT_NUMBER_KEY: &str = "Conta: ";

/// Score fields, in lookup order
pub const SCORE_FIELDS: [&str; 2] = ["score_credito", "score"];

/// Shown when no score field is present
pub const SCORE_PLACEHOLDER: &str = "não retornado";

/// Client lookup miss
pub const NOT_FOUND: &str = "Não encontrado.";

/// Account number lookup miss
pub const ACCOUNT_NOT_FOUND: &str = "Não localizada.";

/// Access check denied without a server reason
pub const INVESTOR_NOT_FOUND: &str = "Investidor não encontrado.";

/// Feedback color class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Error,
}

impl Tone {
    /// CSS color, `None` for the default color
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Tone::Neutral => None,
            Tone::Success => Some("#2ecc71"),
            Tone::Error => Some("#e74c3c"),
        }
    }
}

/// What a feedback area shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiFeedbackState {
    pub visible: bool,
    pub text: String,
    pub tone: Tone,
}

impl UiFeedbackState {
    /// Hidden, empty, default color
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn shown(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            visible: true,
            text: text.into(),
            tone,
        }
    }
}

/// Follow-up applied to the originating form once feedback is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterEffect {
    None,
    /// Clear the form inputs
    ResetForm,
    /// Clear the form, then close its modal after the confirmation delay
    ResetAndClose,
    /// Record the checked document and open the guarded view
    GrantAccess,
}

/// Normalized result of one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub feedback: UiFeedbackState,
    pub effect: AfterEffect,
}

impl Outcome {
    fn show(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            feedback: UiFeedbackState::shown(text, tone),
            effect: AfterEffect::None,
        }
    }

    fn then(mut self, effect: AfterEffect) -> Self {
        self.effect = effect;
        self
    }
}

/// Text shown while a request is in flight
pub fn pending(form: FormId) -> UiFeedbackState {
    let text = match form {
        FormId::Search | FormId::ClientLookup => "Buscando...",
        FormId::Score => "Calculando...",
        FormId::Delete => "Processando exclusão...",
        FormId::Balance => "Atualizando saldo...",
        FormId::Register => "Cadastrando...",
        FormId::AccountLookup => "Buscando conta...",
        FormId::InvestorAccess => "Verificando acesso...",
        FormId::Investment => "Registrando investimento...",
    };
    UiFeedbackState::shown(text, Tone::Neutral)
}

/// Feedback for a submission rejected before dispatch
pub fn rejected(error: &Error) -> Outcome {
    Outcome::show(format!("Erro: {}", error), Tone::Error)
}

/// Normalize the result of a call made by `form`
pub fn normalize(form: FormId, result: &ApiResult) -> Outcome {
    match result {
        ApiResult::Success { payload, .. } => succeeded(form, payload),
        ApiResult::Failure(Failure {
            code: FailureCode::Network { service },
            ..
        }) => Outcome::show(format!("Erro de conexão com o {}.", service.label()), Tone::Error),
        ApiResult::Failure(failure) => failed(form, failure),
    }
}

fn succeeded(form: FormId, payload: &Value) -> Outcome {
    match form {
        FormId::Search | FormId::ClientLookup => {
            if payload.is_null() {
                Outcome::show(NOT_FOUND, Tone::Neutral)
            } else {
                Outcome::show(pretty(payload), Tone::Neutral)
            }
        }
        FormId::Score => Outcome::show(
            format!("Pontuação de Crédito: {}", extract_score(payload)),
            Tone::Neutral,
        ),
        FormId::Delete => {
            let text = match payload {
                Value::String(s) => s.as_str(),
                _ => "Cadastro encerrado com sucesso!",
            };
            Outcome::show(text, Tone::Success).then(AfterEffect::ResetForm)
        }
        FormId::Balance => Outcome::show("Saldo atualizado!", Tone::Success),
        FormId::Register => Outcome::show("Sucesso! Cliente cadastrado.", Tone::Success)
            .then(AfterEffect::ResetAndClose),
        FormId::AccountLookup => match extract_account_number(payload) {
            Some(conta) => Outcome::show(format!("Conta: {}", conta), Tone::Neutral),
            None => Outcome::show(ACCOUNT_NOT_FOUND, Tone::Neutral),
        },
        FormId::InvestorAccess => {
            Outcome::show("Acesso liberado.", Tone::Success).then(AfterEffect::GrantAccess)
        }
        FormId::Investment => Outcome::show("Investimento registrado com sucesso!", Tone::Success)
            .then(AfterEffect::ResetAndClose),
    }
}

fn failed(form: FormId, failure: &Failure) -> Outcome {
    let fallback = match form {
        FormId::ClientLookup => return Outcome::show(NOT_FOUND, Tone::Neutral),
        FormId::AccountLookup => return Outcome::show(ACCOUNT_NOT_FOUND, Tone::Neutral),
        FormId::InvestorAccess => {
            return Outcome::show(failure.reason(INVESTOR_NOT_FOUND), Tone::Error)
        }
        FormId::Search => "Cliente não encontrado.",
        FormId::Score => "Falha ao calcular score.",
        FormId::Delete => "Falha na exclusão.",
        FormId::Balance => "Falha ao atualizar saldo.",
        FormId::Register => "Erro no cadastro.",
        FormId::Investment => "Erro ao registrar investimento.",
    };
    Outcome::show(format!("Erro: {}", failure.reason(fallback)), Tone::Error)
}

/// Credit score from either field name, first present wins.
///
/// A `null` field counts as absent.
pub fn extract_score(payload: &Value) -> String {
    SCORE_FIELDS
        .iter()
        .filter_map(|field| payload.get(field))
        .find(|v| !v.is_null())
        .map(scalar_text)
        .unwrap_or_else(|| SCORE_PLACEHOLDER.to_string())
}

/// Account number under [`ACCOUNT_NUMBER_KEY`]; `None` when missing,
/// `null` or empty.
pub fn extract_account_number(payload: &Value) -> Option<String> {
    match payload.get(ACCOUNT_NUMBER_KEY)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        v => Some(scalar_text(v)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
