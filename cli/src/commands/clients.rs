//! Client commands

use super::{submit, CliBridge};
use crate::ClientCommands;
use javer_client::{Outcome, RegistrationForm, Submission, Toggle};

pub async fn handle(
    action: ClientCommands,
    bridge: &mut CliBridge,
) -> Result<Option<Outcome>, String> {
    match action {
        ClientCommands::Search { nome } => submit(bridge, Submission::SearchByName { nome }).await,
        ClientCommands::Get { documento } => {
            submit(bridge, Submission::ClientLookup { documento }).await
        }
        ClientCommands::Register {
            nome,
            telefone,
            documento,
            correntista,
            investidor,
            email,
            patrimonio,
            perfil,
        } => {
            bridge.toggle(Toggle::Correntista, correntista);
            bridge.toggle(Toggle::Investidor, investidor);
            let form = RegistrationForm {
                nome,
                telefone,
                documento,
                correntista,
                investidor,
                email,
                patrimonio,
                perfil,
            };
            submit(bridge, Submission::Register(form)).await
        }
        ClientCommands::Delete { documento } => {
            submit(bridge, Submission::DeleteClient { documento }).await
        }
    }
}
