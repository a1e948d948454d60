//! Account commands

use super::{submit, CliBridge};
use crate::AccountCommands;
use javer_client::{Outcome, Submission};

pub async fn handle(
    action: AccountCommands,
    bridge: &mut CliBridge,
) -> Result<Option<Outcome>, String> {
    match action {
        AccountCommands::Score { documento } => {
            submit(bridge, Submission::CreditScore { documento }).await
        }
        AccountCommands::Number { documento } => {
            submit(bridge, Submission::AccountLookup { documento }).await
        }
        AccountCommands::Balance { conta, valor } => {
            submit(bridge, Submission::UpdateBalance { conta, novo_saldo: valor }).await
        }
    }
}
