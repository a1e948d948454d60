//! Event binding
//!
//! [`Bridge`] receives UI events and drives the builder, the transport and
//! the normalizer, writing results back through a [`Surface`]. Each
//! submission is one async operation that suspends at the network call.
//! Nothing prevents a form from being submitted again while its previous
//! request is still in flight.
//!
//! A confirmed creation does not hold the bridge during its confirmation
//! pause. The modal close is scheduled as a [`DeferredClose`] and runs on
//! the first event after its deadline, or on [`Bridge::settle`].

use std::collections::HashSet;

use tokio::time::Instant;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::feedback::{self, AfterEffect, Outcome, UiFeedbackState};
use crate::form::{normalize_document, FieldGroup, FormId, Submission, Toggle};
use crate::request;
use crate::session::{InvestorSession, SessionStorage};
use crate::transport::HttpTransport;

/// The page the bridge renders into
pub trait Surface {
    /// Update the feedback area owned by `form`
    fn render(&mut self, form: FormId, state: &UiFeedbackState);
    /// Clear the inputs of `form`
    fn reset_form(&mut self, form: FormId);
    /// Show or hide a modal
    fn set_modal_visible(&mut self, modal: &str, visible: bool);
    /// Show or hide a conditional field group
    fn set_group_visible(&mut self, group: FieldGroup, visible: bool);
    /// Leave the page for another view
    fn navigate(&mut self, view: &str);
    /// Show the investor portal for the stored document, if any
    fn render_portal(&mut self, documento: Option<&str>);
}

/// Discrete UI events
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    OpenModal(String),
    CloseModal(String),
    /// Click anywhere; closes the modal when the target is its backdrop
    BackdropClick(String),
    Toggle { toggle: Toggle, checked: bool },
    Submit(Submission),
    /// Load the guarded investor view
    OpenPortal,
}

/// Modal close scheduled after a confirmed creation
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredClose {
    pub modal: &'static str,
    pub due: Instant,
}

/// Form-to-API bridge
pub struct Bridge<S: Surface> {
    transport: HttpTransport,
    session: SessionStorage,
    surface: S,
    open_modals: HashSet<String>,
    deferred: Vec<DeferredClose>,
}

impl<S: Surface> Bridge<S> {
    pub fn new(config: ApiConfig, surface: S) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            session: SessionStorage::new(),
            surface,
            open_modals: HashSet::new(),
            deferred: Vec::new(),
        })
    }

    /// Use an existing session instead of a fresh one
    pub fn with_session(mut self, session: SessionStorage) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        self.transport.config()
    }

    pub fn session(&self) -> &SessionStorage {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn is_modal_open(&self, modal: &str) -> bool {
        self.open_modals.contains(modal)
    }

    /// Closes still waiting for their deadline
    pub fn deferred_closes(&self) -> &[DeferredClose] {
        &self.deferred
    }

    /// Run every scheduled close whose deadline has passed
    pub fn run_due(&mut self) {
        let now = Instant::now();
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.deferred.drain(..).partition(|d| d.due <= now);
        self.deferred = waiting;
        for close in due {
            self.close_modal(close.modal);
        }
    }

    /// Wait out every scheduled close and run it
    pub async fn settle(&mut self) {
        for close in std::mem::take(&mut self.deferred) {
            tokio::time::sleep_until(close.due).await;
            self.close_modal(close.modal);
        }
    }

    /// Handle one event. Submissions return their outcome.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Option<Outcome>> {
        self.run_due();
        match event {
            UiEvent::OpenModal(modal) => self.open_modal(&modal),
            UiEvent::CloseModal(modal) => self.close_modal(&modal),
            UiEvent::BackdropClick(target) => self.click(&target),
            UiEvent::Toggle { toggle, checked } => self.toggle(toggle, checked),
            UiEvent::Submit(submission) => return self.submit(submission).await.map(Some),
            UiEvent::OpenPortal => {
                self.open_portal();
            }
        }
        Ok(None)
    }

    pub fn open_modal(&mut self, modal: &str) {
        self.open_modals.insert(modal.to_string());
        self.surface.set_modal_visible(modal, true);
    }

    /// Hide the modal and clear every feedback area
    pub fn close_modal(&mut self, modal: &str) {
        self.open_modals.remove(modal);
        self.surface.set_modal_visible(modal, false);
        let cleared = UiFeedbackState::cleared();
        for form in FormId::ALL {
            self.surface.render(form, &cleared);
        }
    }

    pub fn click(&mut self, target: &str) {
        if self.is_modal_open(target) {
            self.close_modal(target);
        }
    }

    pub fn toggle(&mut self, toggle: Toggle, checked: bool) {
        self.surface.set_group_visible(toggle.group(), checked);
    }

    /// Render the guarded view from the session token.
    ///
    /// The stored document is trusted as is; nothing is sent to the server.
    pub fn open_portal(&mut self) -> Option<String> {
        let documento = InvestorSession::current(&self.session);
        if documento.is_none() {
            tracing::warn!("portal opened without an investor session");
        }
        self.surface.render_portal(documento.as_deref());
        documento
    }

    /// Build, send and render one submission.
    ///
    /// Validation failures are rendered and returned as an outcome without
    /// touching the network. Only a malformed base URL is an `Err`.
    pub async fn submit(&mut self, submission: Submission) -> Result<Outcome> {
        let form = submission.form();

        let prepared = match request::build(&submission, self.transport.config()) {
            Ok(prepared) => prepared,
            Err(e) if e.is_validation_error() => {
                tracing::warn!(%form, error = %e, "submission rejected");
                let outcome = feedback::rejected(&e);
                self.surface.render(form, &outcome.feedback);
                return Ok(outcome);
            }
            Err(e) => return Err(e),
        };

        self.surface.render(form, &feedback::pending(form));
        let result = self.transport.invoke(&prepared).await?;
        tracing::debug!(%form, success = result.is_success(), "response received");
        let outcome = feedback::normalize(form, &result);
        self.surface.render(form, &outcome.feedback);

        self.apply(&submission, outcome.effect);
        Ok(outcome)
    }

    fn apply(&mut self, submission: &Submission, effect: AfterEffect) {
        let form = submission.form();
        match effect {
            AfterEffect::None => {}
            AfterEffect::ResetForm => self.surface.reset_form(form),
            AfterEffect::ResetAndClose => {
                self.surface.reset_form(form);
                self.deferred.push(DeferredClose {
                    modal: form.modal(),
                    due: Instant::now() + self.transport.config().confirm_delay(),
                });
            }
            AfterEffect::GrantAccess => {
                if let Submission::InvestorAccess { documento } = submission {
                    InvestorSession::grant(&self.session, &normalize_document(documento));
                    let view = self.transport.config().portal_view.clone();
                    self.surface.navigate(&view);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Tone;
    use crate::form::{InvestmentForm, RegistrationForm};
    use crate::session::SESSION_KEY;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{any, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Render(FormId, UiFeedbackState),
        Reset(FormId),
        Modal(String, bool),
        Group(FieldGroup, bool),
        Navigate(String),
        Portal(Option<String>),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn renders(&self, form: FormId) -> Vec<&UiFeedbackState> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Render(f, state) if *f == form => Some(state),
                    _ => None,
                })
                .collect()
        }

        fn has(&self, call: &Call) -> bool {
            self.calls.contains(call)
        }
    }

    impl Surface for RecordingSurface {
        fn render(&mut self, form: FormId, state: &UiFeedbackState) {
            self.calls.push(Call::Render(form, state.clone()));
        }

        fn reset_form(&mut self, form: FormId) {
            self.calls.push(Call::Reset(form));
        }

        fn set_modal_visible(&mut self, modal: &str, visible: bool) {
            self.calls.push(Call::Modal(modal.to_string(), visible));
        }

        fn set_group_visible(&mut self, group: FieldGroup, visible: bool) {
            self.calls.push(Call::Group(group, visible));
        }

        fn navigate(&mut self, view: &str) {
            self.calls.push(Call::Navigate(view.to_string()));
        }

        fn render_portal(&mut self, documento: Option<&str>) {
            self.calls.push(Call::Portal(documento.map(str::to_string)));
        }
    }

    fn config_for(server: &MockServer, confirm_delay_ms: u64) -> ApiConfig {
        ApiConfig {
            core_url: server.uri(),
            investment_url: server.uri(),
            confirm_delay_ms,
            ..ApiConfig::default()
        }
    }

    fn bridge_for(server: &MockServer) -> Bridge<RecordingSurface> {
        Bridge::new(config_for(server, 20), RecordingSurface::default()).unwrap()
    }

    async fn mount_register_ok(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/clientes"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"documento": "11122233344"})),
            )
            .mount(server)
            .await;
    }

    fn ana() -> Submission {
        Submission::Register(RegistrationForm {
            nome: "Ana".into(),
            telefone: "11988887777".into(),
            documento: "111.222.333-44".into(),
            correntista: true,
            ..RegistrationForm::default()
        })
    }

    #[tokio::test]
    async fn test_register_success_resets_and_closes_modal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/clientes"))
            .and(query_param("nome", "Ana"))
            .and(query_param("documento", "11122233344"))
            .and(query_param("correntista", "true"))
            .and(query_param("investidor", "false"))
            .and(query_param_is_missing("email"))
            .and(query_param_is_missing("patrimonio"))
            .and(query_param_is_missing("perfil"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"documento": "11122233344"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        bridge.dispatch(UiEvent::OpenModal("modalCadastro".into())).await.unwrap();
        bridge
            .dispatch(UiEvent::Toggle { toggle: Toggle::Correntista, checked: true })
            .await
            .unwrap();

        let outcome = bridge
            .submit(Submission::Register(RegistrationForm {
                nome: "Ana".into(),
                telefone: "11988887777".into(),
                documento: "111.222.333-44".into(),
                correntista: true,
                investidor: false,
                ..RegistrationForm::default()
            }))
            .await
            .unwrap();

        assert_eq!(outcome.feedback.text, "Sucesso! Cliente cadastrado.");
        bridge.settle().await;
        assert!(!bridge.is_modal_open("modalCadastro"));

        let surface = bridge.surface();
        assert!(surface.has(&Call::Group(FieldGroup::Banking, true)));
        assert!(surface.has(&Call::Reset(FormId::Register)));
        assert!(surface.has(&Call::Modal("modalCadastro".into(), false)));

        let renders = surface.renders(FormId::Register);
        assert_eq!(renders[0].text, "Cadastrando...");
        assert_eq!(renders[1].text, "Sucesso! Cliente cadastrado.");
        assert_eq!(renders[1].tone, Tone::Success);
        assert_eq!(*renders[2], UiFeedbackState::cleared());

        server.verify().await;
    }

    #[tokio::test]
    async fn test_delete_not_found_keeps_form() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/clientes/excluir/12345678900"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        bridge.open_modal("modalExcluir");
        let outcome = bridge
            .submit(Submission::DeleteClient { documento: "123.456.789-00".into() })
            .await
            .unwrap();

        assert_eq!(outcome.feedback.text, "Erro: not found");
        assert_eq!(outcome.feedback.tone, Tone::Error);
        assert!(!bridge.surface().has(&Call::Reset(FormId::Delete)));
        assert!(bridge.is_modal_open("modalExcluir"));
    }

    #[tokio::test]
    async fn test_missing_ticker_never_reaches_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        let outcome = bridge
            .submit(Submission::NewInvestment(InvestmentForm {
                documento: "11122233344".into(),
                tipo: "ACOES".into(),
                valor_investido: "1000".into(),
                ativo: true,
                ticker: String::new(),
            }))
            .await
            .unwrap();

        assert!(outcome.feedback.visible);
        assert_eq!(outcome.feedback.tone, Tone::Error);
        assert_eq!(
            outcome.feedback.text,
            "Erro: O campo \"ticker\" é obrigatório para investimentos do tipo ACOES."
        );
        assert_eq!(bridge.surface().renders(FormId::Investment).len(), 1);

        server.verify().await;
    }

    #[tokio::test]
    async fn test_access_granted_stores_document_and_navigates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/investimentos/acesso/11122233344"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acesso": true})))
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        bridge
            .submit(Submission::InvestorAccess { documento: "111.222.333-44".into() })
            .await
            .unwrap();

        assert_eq!(bridge.session().get(SESSION_KEY), Some("11122233344".into()));
        assert!(bridge.surface().has(&Call::Navigate("portal_investidor".into())));
    }

    #[tokio::test]
    async fn test_access_denied_does_not_navigate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/investimentos/acesso/11122233344"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"detail": "Acesso não autorizado."})),
            )
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        let outcome = bridge
            .submit(Submission::InvestorAccess { documento: "11122233344".into() })
            .await
            .unwrap();

        assert_eq!(outcome.feedback.text, "Acesso não autorizado.");
        assert_eq!(InvestorSession::current(bridge.session()), None);
        assert!(!bridge
            .surface()
            .calls
            .iter()
            .any(|c| matches!(c, Call::Navigate(_))));
    }

    #[tokio::test]
    async fn test_access_unreachable_names_investment_service() {
        let config = ApiConfig {
            investment_url: "http://127.0.0.1:1".into(),
            ..ApiConfig::default()
        };
        let mut bridge = Bridge::new(config, RecordingSurface::default()).unwrap();

        let outcome = bridge
            .submit(Submission::InvestorAccess { documento: "11122233344".into() })
            .await
            .unwrap();

        assert_eq!(outcome.feedback.text, "Erro de conexão com o serviço de investimentos.");
        assert_eq!(InvestorSession::current(bridge.session()), None);
    }

    #[tokio::test]
    async fn test_backdrop_click_closes_and_clears() {
        let server = MockServer::start().await;
        let mut bridge = bridge_for(&server);
        bridge.open_modal("modalScore");

        bridge.dispatch(UiEvent::BackdropClick("score_input".into())).await.unwrap();
        assert!(bridge.is_modal_open("modalScore"));

        bridge.dispatch(UiEvent::BackdropClick("modalScore".into())).await.unwrap();
        assert!(!bridge.is_modal_open("modalScore"));

        let surface = bridge.into_surface();
        for form in FormId::ALL {
            assert_eq!(surface.renders(form), vec![&UiFeedbackState::cleared()]);
        }
    }

    #[tokio::test]
    async fn test_confirmation_pause_does_not_hold_the_bridge() {
        let server = MockServer::start().await;
        mount_register_ok(&server).await;

        let delay = Duration::from_millis(400);
        let config = config_for(&server, 400);
        let mut bridge = Bridge::new(config, RecordingSurface::default()).unwrap();
        bridge.open_modal("modalCadastro");

        let started = Instant::now();
        let outcome = bridge.submit(ana()).await.unwrap();

        assert!(started.elapsed() < delay);
        assert_eq!(outcome.feedback.text, "Sucesso! Cliente cadastrado.");
        assert!(bridge.surface().has(&Call::Reset(FormId::Register)));
        assert!(bridge.is_modal_open("modalCadastro"));
        assert_eq!(bridge.deferred_closes().len(), 1);
        assert_eq!(bridge.deferred_closes()[0].modal, "modalCadastro");

        bridge
            .dispatch(UiEvent::Toggle { toggle: Toggle::Investidor, checked: true })
            .await
            .unwrap();
        assert!(bridge.surface().has(&Call::Group(FieldGroup::Investing, true)));
        assert!(bridge.is_modal_open("modalCadastro"));

        bridge.settle().await;
        assert!(started.elapsed() >= delay);
        assert!(!bridge.is_modal_open("modalCadastro"));
        assert!(bridge.deferred_closes().is_empty());
    }

    #[tokio::test]
    async fn test_due_close_runs_on_next_event() {
        let server = MockServer::start().await;
        mount_register_ok(&server).await;

        let mut bridge = bridge_for(&server);
        bridge.open_modal("modalCadastro");
        bridge.dispatch(UiEvent::Submit(ana())).await.unwrap();
        assert!(bridge.is_modal_open("modalCadastro"));

        tokio::time::sleep(Duration::from_millis(40)).await;
        bridge.dispatch(UiEvent::OpenModal("modalScore".into())).await.unwrap();

        assert!(!bridge.is_modal_open("modalCadastro"));
        assert!(bridge.is_modal_open("modalScore"));
        assert!(bridge.deferred_closes().is_empty());
    }

    #[tokio::test]
    async fn test_portal_reads_token_left_by_gate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/investimentos/acesso/11122233344"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acesso": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut gate = bridge_for(&server);
        gate.dispatch(UiEvent::Submit(Submission::InvestorAccess {
            documento: "111.222.333-44".into(),
        }))
        .await
        .unwrap();
        assert!(gate.surface().has(&Call::Navigate("portal_investidor".into())));

        let mut portal = Bridge::new(config_for(&server, 20), RecordingSurface::default())
            .unwrap()
            .with_session(gate.session().clone());
        portal.dispatch(UiEvent::OpenPortal).await.unwrap();

        assert_eq!(portal.surface().calls, vec![Call::Portal(Some("11122233344".into()))]);
        // No second access check
        server.verify().await;
    }

    #[tokio::test]
    async fn test_portal_without_token() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut bridge = bridge_for(&server);
        assert_eq!(bridge.open_portal(), None);
        assert_eq!(bridge.surface().calls, vec![Call::Portal(None)]);

        server.verify().await;
    }
}
