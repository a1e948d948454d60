//! Investment commands

use super::{submit, CliBridge};
use crate::InvestmentCommands;
use javer_client::{AfterEffect, InvestmentForm, Outcome, Submission, UiEvent};

pub async fn handle(
    action: InvestmentCommands,
    bridge: &mut CliBridge,
) -> Result<Option<Outcome>, String> {
    match action {
        InvestmentCommands::Access { documento } => {
            let outcome = submit(bridge, Submission::InvestorAccess { documento }).await?;
            if matches!(&outcome, Some(o) if o.effect == AfterEffect::GrantAccess) {
                bridge.dispatch(UiEvent::OpenPortal).await.map_err(|e| e.to_string())?;
            }
            Ok(outcome)
        }
        InvestmentCommands::New { documento, tipo, valor, inativo, ticker } => {
            let form = InvestmentForm {
                documento,
                tipo,
                valor_investido: valor,
                ativo: !inativo,
                ticker,
            };
            submit(bridge, Submission::NewInvestment(form)).await
        }
    }
}
