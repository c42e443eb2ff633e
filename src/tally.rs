use crate::census::{Address, Census, IndexedCensus};
use crate::curve::PairingCurve;
use crate::error::{Error, Result};
use crate::voter::Vote;
use serde::{Deserialize, Serialize};

/// Result of a weighted two-option election.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedResult {
    pub total_voters: u64,
    pub yes_voters: u64,
    pub total_votes: u64,
    pub yes_votes: u64,
}

impl WeightedResult {
    fn credit(&self, weight: u64, vote: Vote) -> Result<Self> {
        let mut next = *self;
        next.total_voters = next.total_voters.checked_add(1).ok_or(Error::TallyOverflow)?;
        next.total_votes = next
            .total_votes
            .checked_add(weight)
            .ok_or(Error::TallyOverflow)?;
        if vote == Vote::For {
            next.yes_voters = next.yes_voters.checked_add(1).ok_or(Error::TallyOverflow)?;
            next.yes_votes = next
                .yes_votes
                .checked_add(weight)
                .ok_or(Error::TallyOverflow)?;
        }
        Ok(next)
    }
}

/// Result of an election that counts heads only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub total_voters: u64,
    pub yes_voters: u64,
}

fn tagged<'a>(
    for_voters: &'a [Address],
    against_voters: &'a [Address],
) -> impl Iterator<Item = (&'a Address, Vote)> {
    for_voters
        .iter()
        .map(|a| (a, Vote::For))
        .chain(against_voters.iter().map(|a| (a, Vote::Against)))
}

/// Returns the updated result; the census flags are already flipped.
/// Voters credited by an earlier batch are skipped. Nothing is flagged
/// unless the whole batch adds up without overflow.
pub fn tally_weighted<C: PairingCurve>(
    census: &mut Census<C>,
    result: &WeightedResult,
    for_voters: &[Address],
    against_voters: &[Address],
) -> Result<WeightedResult> {
    let mut next = *result;
    let mut credited = Vec::new();
    for (address, vote) in tagged(for_voters, against_voters) {
        match census.get(address) {
            Some(entry) if !entry.has_voted => {
                next = next.credit(entry.weight, vote)?;
                credited.push(*address);
            }
            _ => {}
        }
    }
    mark_voted(census, &credited);
    Ok(next)
}

/// Adds the weight of every newly seen voter to `for_votes`.
pub fn tally_for_votes<C: PairingCurve>(
    census: &mut Census<C>,
    for_votes: u64,
    for_voters: &[Address],
) -> Result<u64> {
    let mut next = for_votes;
    let mut credited = Vec::new();
    for address in for_voters {
        match census.get(address) {
            Some(entry) if !entry.has_voted => {
                next = next.checked_add(entry.weight).ok_or(Error::TallyOverflow)?;
                credited.push(*address);
            }
            _ => {}
        }
    }
    mark_voted(census, &credited);
    Ok(next)
}

pub fn tally_counts<C: PairingCurve>(
    census: &mut IndexedCensus<C>,
    result: &CountResult,
    yes: &[usize],
    no: &[usize],
) -> Result<CountResult> {
    let mut next = *result;
    let mut credited = Vec::new();
    let tagged_indices = yes
        .iter()
        .map(|i| (*i, Vote::For))
        .chain(no.iter().map(|i| (*i, Vote::Against)));
    for (index, vote) in tagged_indices {
        if census.has_voted(index) {
            continue;
        }
        next.total_voters = next.total_voters.checked_add(1).ok_or(Error::TallyOverflow)?;
        if vote == Vote::For {
            next.yes_voters = next.yes_voters.checked_add(1).ok_or(Error::TallyOverflow)?;
        }
        credited.push(index);
    }
    for index in credited {
        census.mark_voted(index);
    }
    Ok(next)
}

fn mark_voted<C: PairingCurve>(census: &mut Census<C>, credited: &[Address]) {
    for address in credited {
        if let Some(entry) = census.get_mut(address) {
            entry.has_voted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{address, MockCurve};

    fn census(weights: &[u64]) -> Result<Census<MockCurve>> {
        let mut census = Census::new();
        for (i, weight) in weights.iter().enumerate() {
            census.register(address(i), i as u64 + 1, *weight)?;
        }
        Ok(census)
    }

    #[test]
    fn split_vote() -> Result<()> {
        let mut census = census(&[10, 20])?;
        let result = tally_weighted(
            &mut census,
            &WeightedResult::default(),
            &[address(0)],
            &[address(1)],
        )?;
        assert_eq!(
            result,
            WeightedResult {
                total_voters: 2,
                yes_voters: 1,
                total_votes: 30,
                yes_votes: 10,
            }
        );
        assert!(census.get(&address(0)).unwrap().has_voted);
        assert!(census.get(&address(1)).unwrap().has_voted);
        Ok(())
    }

    #[test]
    fn repeated_voter_counts_once() -> Result<()> {
        let mut census = census(&[7, 3])?;
        let first = tally_weighted(&mut census, &WeightedResult::default(), &[address(0)], &[])?;
        // the same voter shows up again, this time under the other option
        let second = tally_weighted(&mut census, &first, &[address(1)], &[address(0)])?;
        assert_eq!(
            second,
            WeightedResult {
                total_voters: 2,
                yes_voters: 2,
                total_votes: 10,
                yes_votes: 10,
            }
        );
        Ok(())
    }

    #[test]
    fn overflow_leaves_flags_untouched() -> Result<()> {
        let mut census = census(&[1, u64::MAX])?;
        let result = tally_weighted(
            &mut census,
            &WeightedResult::default(),
            &[address(0), address(1)],
            &[],
        );
        assert!(matches!(result, Err(Error::TallyOverflow)));
        assert!(!census.get(&address(0)).unwrap().has_voted);
        Ok(())
    }

    #[test]
    fn for_votes_accumulate_weights_once() -> Result<()> {
        let mut census = census(&[1, 1, 1])?;
        let votes = tally_for_votes(&mut census, 0, &[address(0), address(1)])?;
        let votes = tally_for_votes(&mut census, votes, &[address(1), address(2)])?;
        assert_eq!(votes, 3);
        Ok(())
    }

    #[test]
    fn counts_skip_indices_already_counted() -> Result<()> {
        let mut census = IndexedCensus::<MockCurve>::new();
        census.push(1)?;
        census.push(2)?;
        let result = tally_counts(&mut census, &CountResult::default(), &[0], &[])?;
        let result = tally_counts(&mut census, &result, &[0], &[1])?;
        assert_eq!(
            result,
            CountResult {
                total_voters: 2,
                yes_voters: 1,
            }
        );
        Ok(())
    }
}
