//! Request Builder
//!
//! Turns a [`Submission`] into the endpoint to call and the parameters to
//! send. Every local rule is checked here, so a submission that fails
//! validation never reaches the transport.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::{ApiConfig, ScoreRoute};
use crate::error::{Error, Result};
use crate::form::{
    normalize_document, FormId, FormRequest, InvestmentForm, RegistrationForm, Submission,
};

/// API domain a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    /// Core banking API (clients, accounts)
    Core,
    /// Investment service (portal access, investments)
    Investment,
}

impl Service {
    /// Human-readable name used in connectivity warnings
    pub fn label(&self) -> &'static str {
        match self {
            Service::Core => "servidor do banco",
            Service::Investment => "serviço de investimentos",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Service, path and method of a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    pub service: Service,
    pub method: Method,
    /// Unencoded path segments, appended to the service base URL
    pub segments: Vec<String>,
}

impl EndpointTarget {
    pub fn new<I, S>(service: Service, method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service,
            method,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path relative to the base URL, e.g. `/clientes/excluir/123`
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Everything the transport needs for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Originating form
    pub form: FormId,
    pub target: EndpointTarget,
    /// Sent as the query string
    pub params: FormRequest,
}

/// Investment types accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentKind {
    RendaFixa,
    Acoes,
    Fundos,
    Cripto,
}

impl InvestmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentKind::RendaFixa => "RENDA FIXA",
            InvestmentKind::Acoes => "ACOES",
            InvestmentKind::Fundos => "FUNDOS",
            InvestmentKind::Cripto => "CRIPTO",
        }
    }

    /// Everything but fixed income is traded by ticker
    pub fn requires_ticker(&self) -> bool {
        !matches!(self, InvestmentKind::RendaFixa)
    }
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().replace('_', " ").as_str() {
            "RENDA FIXA" => Ok(InvestmentKind::RendaFixa),
            "ACOES" | "AÇÕES" => Ok(InvestmentKind::Acoes),
            "FUNDOS" => Ok(InvestmentKind::Fundos),
            "CRIPTO" => Ok(InvestmentKind::Cripto),
            _ => Err(Error::validation("Tipo de investimento inválido.")),
        }
    }
}

/// Investor risk profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestorProfile {
    #[default]
    Conservador,
    Moderado,
    Arrojado,
}

impl InvestorProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestorProfile::Conservador => "CONSERVADOR",
            InvestorProfile::Moderado => "MODERADO",
            InvestorProfile::Arrojado => "ARROJADO",
        }
    }
}

impl FromStr for InvestorProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSERVADOR" => Ok(InvestorProfile::Conservador),
            "MODERADO" => Ok(InvestorProfile::Moderado),
            "ARROJADO" => Ok(InvestorProfile::Arrojado),
            _ => Err(Error::validation("Informe um perfil de investidor válido.")),
        }
    }
}

/// Build the request for a submission.
///
/// Fails with [`Error::Validation`] before anything is sent when a local
/// rule is broken.
pub fn build(submission: &Submission, config: &ApiConfig) -> Result<PreparedRequest> {
    use Service::{Core, Investment};

    let (target, params) = match submission {
        Submission::SearchByName { nome } => (
            EndpointTarget::new(Core, Method::GET, ["clientes", "busca", "nome"]),
            FormRequest::new().text("nome", nome.trim()),
        ),
        Submission::CreditScore { documento } => {
            let doc = document_segment(documento)?;
            match config.score_route {
                ScoreRoute::Path => (
                    EndpointTarget::new(Core, Method::GET, ["contas", "score", doc.as_str()]),
                    FormRequest::new(),
                ),
                ScoreRoute::Query => (
                    EndpointTarget::new(Core, Method::GET, ["contas", "score"]),
                    FormRequest::new().text("id_cliente", doc),
                ),
            }
        }
        Submission::DeleteClient { documento } => {
            let doc = document_segment(documento)?;
            (
                EndpointTarget::new(Core, Method::DELETE, ["clientes", "excluir", doc.as_str()]),
                FormRequest::new(),
            )
        }
        Submission::UpdateBalance { conta, novo_saldo } => {
            let conta = conta.trim();
            if conta.is_empty() {
                return Err(Error::validation("Informe o número da conta."));
            }
            let novo_saldo = amount(novo_saldo)?;
            (
                EndpointTarget::new(Core, Method::PATCH, ["contas", "atualizar-saldo", conta]),
                FormRequest::new().text("novo_saldo", novo_saldo),
            )
        }
        Submission::Register(form) => (
            EndpointTarget::new(Core, Method::POST, ["clientes"]),
            registration_params(form)?,
        ),
        Submission::ClientLookup { documento } => {
            let doc = document_segment(documento)?;
            (
                EndpointTarget::new(Core, Method::GET, ["clientes", doc.as_str()]),
                FormRequest::new(),
            )
        }
        Submission::AccountLookup { documento } => {
            let doc = document_segment(documento)?;
            (
                EndpointTarget::new(Core, Method::GET, ["contas", "numero", doc.as_str()]),
                FormRequest::new(),
            )
        }
        Submission::InvestorAccess { documento } => {
            let doc = document_segment(documento)?;
            (
                EndpointTarget::new(
                    Investment,
                    Method::GET,
                    ["investimentos", "acesso", doc.as_str()],
                ),
                FormRequest::new(),
            )
        }
        Submission::NewInvestment(form) => (
            EndpointTarget::new(Investment, Method::POST, ["investimento", "novo"]),
            investment_params(form)?,
        ),
    };

    let request = PreparedRequest {
        form: submission.form(),
        target,
        params,
    };
    tracing::debug!(
        form = %request.form,
        method = %request.target.method,
        path = %request.target.path(),
        params = request.params.len(),
        "request built"
    );
    Ok(request)
}

fn registration_params(form: &RegistrationForm) -> Result<FormRequest> {
    let mut params = FormRequest::new()
        .text("nome", form.nome.trim())
        .text("telefone", form.telefone.trim())
        .text("documento", normalize_document(&form.documento))
        .flag("correntista", form.correntista)
        .flag("investidor", form.investidor);

    // Investor fields exist only while the toggle is on; the API rejects
    // them otherwise.
    if form.investidor {
        let patrimonio = match form.patrimonio.trim() {
            "" => "0".to_string(),
            raw => amount(raw)?,
        };
        let perfil = match form.perfil.trim() {
            "" => InvestorProfile::default(),
            raw => raw.parse()?,
        };
        params = params
            .text("email", form.email.trim())
            .text("patrimonio", patrimonio)
            .text("perfil", perfil.as_str());
    }

    Ok(params)
}

fn investment_params(form: &InvestmentForm) -> Result<FormRequest> {
    let kind: InvestmentKind = form.tipo.parse()?;
    let ticker = form.ticker.trim();
    if kind.requires_ticker() && ticker.is_empty() {
        return Err(Error::validation(format!(
            "O campo \"ticker\" é obrigatório para investimentos do tipo {}.",
            kind
        )));
    }
    let valor = amount(&form.valor_investido)?;

    let mut params = FormRequest::new()
        .text("documento", normalize_document(&form.documento))
        .text("tipo", kind.as_str())
        .text("valor_investido", valor)
        .flag("ativo", form.ativo);
    if kind.requires_ticker() {
        params = params.text("ticker", ticker.to_ascii_uppercase());
    }
    Ok(params)
}

/// Normalized document for use as a path segment
fn document_segment(raw: &str) -> Result<String> {
    let doc = normalize_document(raw);
    if doc.is_empty() {
        return Err(Error::validation("Informe um CPF válido. Insira somente números."));
    }
    Ok(doc)
}

/// Monetary input, trimmed; must parse as a decimal number
fn amount(raw: &str) -> Result<String> {
    let value = raw.trim();
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(value.to_string()),
        _ => Err(Error::validation("Insira um valor válido.")),
    }
}
