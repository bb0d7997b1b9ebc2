use std::sync::Arc;

use shared::{
    domain::{AudienceScreen, LowerThird},
    error::CommandError,
    protocol::ControlCommand,
};
use storage::Storage;

pub mod display;
pub mod ordering;

use display::AudienceDisplay;

#[derive(Clone)]
pub struct ControlContext {
    pub storage: Storage,
    pub display: Arc<AudienceDisplay>,
}

/// Whether the operator UI should reload its list view after a command.
/// Show and hide stay silent: the operator's own page does not need to
/// re-render for a change that only targets the audience display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Reload,
    Silent,
}

pub async fn handle_command(
    ctx: &ControlContext,
    command: ControlCommand,
) -> Result<Effect, CommandError> {
    match command {
        ControlCommand::Save(lower_third) => {
            save_or_create(ctx, lower_third).await?;
            Ok(Effect::Reload)
        }
        ControlCommand::Delete(params) => {
            ctx.storage.delete_lower_third(params.id).await?;
            Ok(Effect::Reload)
        }
        ControlCommand::Show(lower_third) => {
            let saved = save_or_create(ctx, lower_third).await?;
            ctx.display.show_lower_third(saved);
            Ok(Effect::Silent)
        }
        ControlCommand::Hide(lower_third) => {
            save_or_create(ctx, lower_third).await?;
            ctx.display.set_screen(AudienceScreen::Blank);
            Ok(Effect::Silent)
        }
        ControlCommand::Reorder(params) => {
            ordering::reorder(&ctx.storage, params.id, params.move_up).await?;
            Ok(Effect::Reload)
        }
    }
}

/// Create-or-update keyed on whether the incoming id matches a stored
/// record. Show and hide run through here too, so an operator can edit a
/// record and project it in a single round trip without a separate save.
async fn save_or_create(
    ctx: &ControlContext,
    mut lower_third: LowerThird,
) -> Result<LowerThird, CommandError> {
    if ctx
        .storage
        .lower_third_by_id(lower_third.id)
        .await?
        .is_none()
    {
        ctx.storage.create_lower_third(&mut lower_third).await?;
    } else {
        ctx.storage.save_lower_third(&lower_third).await?;
    }
    Ok(lower_third)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
