use shared::{domain::LowerThirdId, error::CommandError};
use storage::Storage;

/// Moves a lower third one position up or down the rotation by swapping
/// display orders with its neighbor. Positions are recomputed from a fresh
/// list fetch rather than taken from the caller, so the swap always works
/// on current data.
pub async fn reorder(
    storage: &Storage,
    id: LowerThirdId,
    move_up: bool,
) -> Result<(), CommandError> {
    let mut lower_third = storage
        .lower_third_by_id(id)
        .await?
        .ok_or(CommandError::NotFound(id.0))?;

    let lower_thirds = storage.all_lower_thirds().await?;
    let index = lower_thirds
        .iter()
        .position(|third| third.id == lower_third.id)
        .ok_or(CommandError::NotFound(id.0))?;

    let neighbor_index = if move_up {
        if index == 0 {
            return Err(CommandError::AtLimit);
        }
        index - 1
    } else {
        if index + 1 == lower_thirds.len() {
            return Err(CommandError::AtLimit);
        }
        index + 1
    };
    let neighbor_id = lower_thirds[neighbor_index].id;
    let mut neighbor = storage
        .lower_third_by_id(neighbor_id)
        .await?
        .ok_or(CommandError::NotFound(neighbor_id.0))?;

    std::mem::swap(
        &mut lower_third.display_order,
        &mut neighbor.display_order,
    );
    storage.save_lower_third(&lower_third).await?;
    // Not transactional: a failure on the second save leaves the swap half
    // applied.
    storage.save_lower_third(&neighbor).await?;
    Ok(())
}
