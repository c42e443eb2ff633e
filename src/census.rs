use crate::curve::PairingCurve;
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;
use std::convert::TryInto;
use std::fmt;
use std::str::FromStr;

/// A 20 byte account address, the identity a voter registers and is
/// referenced by in batch submissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(b: [u8; 20]) -> Self {
        Self(b)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(b: &[u8]) -> Result<Self> {
        let bytes: [u8; 20] = b.try_into()?;
        Ok(Self::from(bytes))
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Hex, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A registered voter in one election.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CensusEntry<C: PairingCurve> {
    pub public_key: C::G1,
    /// Snapshot taken at registration; later balance changes don't matter.
    pub weight: u64,
    pub has_voted: bool,
}

/// Address keyed census of a single election. Neither an address nor a
/// public key can appear twice.
#[derive(Clone, Debug)]
pub struct Census<C: PairingCurve> {
    entries: HashMap<Address, CensusEntry<C>>,
    keys: HashSet<Vec<u8>>,
}

impl<C: PairingCurve> Default for Census<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            keys: HashSet::new(),
        }
    }
}

impl<C: PairingCurve> Census<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, public_key: C::G1, weight: u64) -> Result<()> {
        self.check_vacant(&address, &public_key)?;
        self.keys.insert(C::g1_to_bytes(&public_key));
        self.entries.insert(
            address,
            CensusEntry {
                public_key,
                weight,
                has_voted: false,
            },
        );
        Ok(())
    }

    /// Fails if either the address or the key is taken.
    pub fn check_vacant(&self, address: &Address, public_key: &C::G1) -> Result<()> {
        if self.entries.contains_key(address) {
            return Err(Error::AlreadyRegistered);
        }
        if self.keys.contains(&C::g1_to_bytes(public_key)) {
            return Err(Error::KeyAlreadyRegistered);
        }
        Ok(())
    }

    pub fn get(&self, address: &Address) -> Option<&CensusEntry<C>> {
        self.entries.get(address)
    }

    pub(crate) fn get_mut(&mut self, address: &Address) -> Option<&mut CensusEntry<C>> {
        self.entries.get_mut(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the public keys behind a submission. Unknown addresses and
    /// addresses listed twice (in one list or across both) make the whole
    /// submission invalid.
    pub fn resolve(
        &self,
        for_voters: &[Address],
        against_voters: &[Address],
    ) -> Result<(Vec<C::G1>, Vec<C::G1>)> {
        let mut seen = HashSet::with_capacity(for_voters.len() + against_voters.len());
        let mut lookup = |addresses: &[Address]| -> Result<Vec<C::G1>> {
            addresses
                .iter()
                .map(|address| {
                    if !seen.insert(*address) {
                        debug!("{} listed twice", address);
                        return Err(Error::VerificationFailed);
                    }
                    match self.entries.get(address) {
                        Some(entry) => Ok(entry.public_key),
                        None => {
                            debug!("{} is not registered", address);
                            Err(Error::VerificationFailed)
                        }
                    }
                })
                .collect()
        };
        let for_keys = lookup(for_voters)?;
        let against_keys = lookup(against_voters)?;
        Ok((for_keys, against_keys))
    }
}

/// Census where voters are referenced by registration order instead of by
/// address. Anyone may add a key.
#[derive(Clone, Debug)]
pub struct IndexedCensus<C: PairingCurve> {
    keys: Vec<C::G1>,
    encoded: HashSet<Vec<u8>>,
    has_voted: Vec<bool>,
}

impl<C: PairingCurve> Default for IndexedCensus<C> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            encoded: HashSet::new(),
            has_voted: Vec::new(),
        }
    }
}

impl<C: PairingCurve> IndexedCensus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index the key is referenced by from now on.
    pub fn push(&mut self, public_key: C::G1) -> Result<usize> {
        if !self.encoded.insert(C::g1_to_bytes(&public_key)) {
            return Err(Error::KeyAlreadyRegistered);
        }
        self.keys.push(public_key);
        self.has_voted.push(false);
        Ok(self.keys.len() - 1)
    }

    pub fn key(&self, index: usize) -> Option<&C::G1> {
        self.keys.get(index)
    }

    pub fn has_voted(&self, index: usize) -> bool {
        self.has_voted.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn mark_voted(&mut self, index: usize) {
        if let Some(flag) = self.has_voted.get_mut(index) {
            *flag = true;
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn resolve(&self, yes: &[usize], no: &[usize]) -> Result<(Vec<C::G1>, Vec<C::G1>)> {
        let mut seen = HashSet::with_capacity(yes.len() + no.len());
        let mut lookup = |indices: &[usize]| -> Result<Vec<C::G1>> {
            indices
                .iter()
                .map(|i| {
                    if !seen.insert(*i) {
                        return Err(Error::VerificationFailed);
                    }
                    self.keys.get(*i).copied().ok_or(Error::VerificationFailed)
                })
                .collect()
        };
        let yes_keys = lookup(yes)?;
        let no_keys = lookup(no)?;
        Ok((yes_keys, no_keys))
    }
}
