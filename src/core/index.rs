//! Dense index mapping for state identifiers.
//!
//! An identifier's index is its discriminant. The table size for a type is
//! found by scanning [`StateId::ALL`] once; the result is memoized per
//! concrete type for the lifetime of the process.

use crate::builder::ConfigurationError;
use crate::core::state_id::{Discriminant, StateId};
use parking_lot::RwLock;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::LazyLock;

static MAX_INDEX: LazyLock<RwLock<HashMap<TypeId, usize>>> = LazyLock::new(Default::default);

/// Dense index of `id`, or `None` if its discriminant is negative.
#[inline]
pub fn index_of<S: StateId>(id: S) -> Option<usize> {
    id.repr().to_index()
}

/// Largest index among the declared identifiers of `S`.
///
/// The first call for a given type scans every declared identifier,
/// checking that each maps to a distinct non-negative index. Later calls
/// hit the cache.
pub fn max_index<S: StateId>() -> Result<usize, ConfigurationError> {
    let key = TypeId::of::<S>();
    if let Some(max) = MAX_INDEX.read().get(&key) {
        return Ok(*max);
    }

    let mut cache = MAX_INDEX.write();
    if let Some(max) = cache.get(&key) {
        return Ok(*max);
    }
    let max = scan::<S>()?;
    cache.insert(key, max);
    tracing::debug!(state_type = type_name::<S>(), max, "memoized state index range");
    Ok(max)
}

/// Number of table slots needed to hold every declared identifier of `S`.
pub fn table_len<S: StateId>() -> Result<usize, ConfigurationError> {
    max_index::<S>().map(|max| max + 1)
}

fn scan<S: StateId>() -> Result<usize, ConfigurationError> {
    let mut indices = Vec::with_capacity(S::ALL.len());
    for &id in S::ALL {
        let index = index_of(id).ok_or_else(|| ConfigurationError::UnmappableState {
            type_name: type_name::<S>(),
            state: id.name(),
            value: id.repr().to_i64(),
        })?;
        indices.push((index, id));
    }

    indices.sort_by_key(|&(index, _)| index);
    if let Some(pair) = indices.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(ConfigurationError::DuplicateIndex {
            first: pair[0].1.name(),
            second: pair[1].1.name(),
            index: pair[0].0,
        });
    }

    let max = indices
        .last()
        .map(|&(index, _)| index)
        .ok_or(ConfigurationError::NoDeclaredStates {
            type_name: type_name::<S>(),
        })?;

    Ok(max)
}

#[cfg(test)]
pub(crate) fn is_memoized<S: StateId>() -> bool {
    MAX_INDEX.read().contains_key(&TypeId::of::<S>())
}
