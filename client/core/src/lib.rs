//! Banco Javer Client - Form-to-API Bridge
//!
//! Client side of the Banco Javer back office: turns form submissions into
//! calls against the core banking and investment APIs and turns their
//! responses into feedback for the page.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            Bridge                                │
//! │   UiEvent ──► request::build ──► HttpTransport ──► feedback      │
//! │                 (FormRequest,     (ApiResult)      (Outcome)     │
//! │                  validation)                          │          │
//! │                                                       ▼          │
//! │   SessionStorage ◄── access gate             Surface (page/CLI)  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use javer_client::{ApiConfig, Bridge, Submission, Surface};
//! # use javer_client::{FieldGroup, FormId, UiFeedbackState};
//! # struct Page;
//! # impl Surface for Page {
//! #     fn render(&mut self, _: FormId, _: &UiFeedbackState) {}
//! #     fn reset_form(&mut self, _: FormId) {}
//! #     fn set_modal_visible(&mut self, _: &str, _: bool) {}
//! #     fn set_group_visible(&mut self, _: FieldGroup, _: bool) {}
//! #     fn navigate(&mut self, _: &str) {}
//! #     fn render_portal(&mut self, _: Option<&str>) {}
//! # }
//!
//! # async fn run() -> javer_client::Result<()> {
//! let mut bridge = Bridge::new(ApiConfig::default(), Page)?;
//! let outcome = bridge
//!     .submit(Submission::AccountLookup { documento: "111.222.333-44".into() })
//!     .await?;
//! println!("{}", outcome.feedback.text);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod feedback;
pub mod form;
pub mod request;
pub mod session;
pub mod transport;

pub use bridge::{Bridge, DeferredClose, Surface, UiEvent};
pub use config::{ApiConfig, ScoreRoute};
pub use error::{Error, Result};
pub use feedback::{AfterEffect, Outcome, Tone, UiFeedbackState};
pub use form::{
    normalize_document, FieldGroup, FormId, FormRequest, FormValue, InvestmentForm,
    RegistrationForm, Submission, Toggle,
};
pub use request::{
    build, EndpointTarget, InvestmentKind, InvestorProfile, PreparedRequest, Service,
};
pub use session::{InvestorSession, SessionStorage, SESSION_KEY};
pub use transport::{ApiResult, Failure, FailureCode, HttpTransport};
