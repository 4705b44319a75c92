use crate::reports;
use clap::Args;
use nameforge::numerology::{RankTable, StrokePair};
use nameforge::{NameForgeError, NfResult};

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Stroke count of the first family character.
    pub f0: u8,

    /// Stroke count of the second family character, 0 for a single one.
    #[arg(default_value_t = 0)]
    pub f1: u8,

    /// Also list the stroke pairs of the best N ranks.
    #[arg(long, default_value_t = 3)]
    pub top: usize,
}

pub fn run(args: &StatsArgs) -> NfResult<()> {
    let family = StrokePair::new(args.f0, args.f1).ok_or_else(|| {
        NameForgeError::InvalidConstraint(format!(
            "family strokes ({}, {}) are outside the table",
            args.f0, args.f1
        ))
    })?;

    let table = RankTable::build();
    let buckets = table
        .ranks_for(family)
        .ok_or_else(|| NameForgeError::InvalidConstraint(format!("no buckets for {}", family)))?;

    reports::print_rank_histogram(family, buckets, args.top);
    Ok(())
}
