// League analytics computed from weekly matchup results.

pub mod efficiency;
pub mod head_to_head;
pub mod luck;
pub mod power;
pub mod records;
