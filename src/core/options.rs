use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{core::ConfigError, Float};

/// The names of every mandatory option, in canonical order.
pub const OPTION_KEYS: [&str; 5] = ["c1", "c2", "w", "k", "p"];

/// The norm used to measure distances between particles when building neighborhoods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Norm {
    /// The $`L_1`$ (Manhattan, `p = 1`) norm.
    Manhattan,
    /// The $`L_2`$ (Euclidean, `p = 2`) norm.
    #[default]
    Euclidean,
}
impl Norm {
    /// The order `p` of the Minkowski distance.
    pub const fn order(&self) -> u32 {
        match self {
            Self::Manhattan => 1,
            Self::Euclidean => 2,
        }
    }
    /// Returns the [`Norm`] of Minkowski order `p`, if supported.
    pub fn from_order(p: Float) -> Option<Self> {
        if p == 1.0 {
            Some(Self::Manhattan)
        } else if p == 2.0 {
            Some(Self::Euclidean)
        } else {
            None
        }
    }
    /// The Minkowski distance of this order between two equally long sequences.
    pub fn distance<'a, I>(&self, a: I, b: I) -> Float
    where
        I: IntoIterator<Item = &'a Float>,
    {
        let diffs = a.into_iter().zip(b).map(|(x, y)| (x - y).abs());
        match self {
            Self::Manhattan => diffs.sum(),
            Self::Euclidean => diffs.map(|d| d * d).sum::<Float>().sqrt(),
        }
    }
}

/// A string-keyed map of raw option values, as given by the user.
///
/// This is the "options mapping" handed to
/// [`LocalBestConfig::new`](crate::algorithms::particles::LocalBestConfig::new). Keys other than
/// `c1`, `c2`, `w`, `k`, and `p` are kept but ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionMap(BTreeMap<String, Float>);

impl OptionMap {
    /// Inserts (or replaces) an option.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Float) -> Option<Float> {
        self.0.insert(key.into(), value)
    }
    /// Removes an option, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Float> {
        self.0.remove(key)
    }
    /// Returns the value of an option, if present.
    pub fn get(&self, key: &str) -> Option<Float> {
        self.0.get(key).copied()
    }
    /// Returns the mandatory keys which are not present in the map, in canonical order.
    pub fn missing_keys(&self) -> Vec<String> {
        OPTION_KEYS
            .iter()
            .filter(|key| !self.0.contains_key(**key))
            .map(|key| key.to_string())
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Float)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (K, Float)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
impl<K: Into<String>, const N: usize> From<[(K, Float); N]> for OptionMap {
    fn from(value: [(K, Float); N]) -> Self {
        value.into_iter().collect()
    }
}
impl<K: Into<String>> From<HashMap<K, Float>> for OptionMap {
    fn from(value: HashMap<K, Float>) -> Self {
        value.into_iter().collect()
    }
}
impl<K: Into<String>> From<BTreeMap<K, Float>> for OptionMap {
    fn from(value: BTreeMap<K, Float>) -> Self {
        value.into_iter().collect()
    }
}
impl From<Options> for OptionMap {
    fn from(value: Options) -> Self {
        [
            ("c1", value.c1),
            ("c2", value.c2),
            ("w", value.w),
            ("k", value.k as Float),
            ("p", value.p.order() as Float),
        ]
        .into()
    }
}

/// The validated hyperparameters of a local-best swarm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// The cognitive weight $`c_1`$ which controls the particle's tendency to move towards its
    /// personal best.
    pub c1: Float,
    /// The social weight $`c_2`$ which controls the particle's tendency to move towards the best
    /// of its neighborhood.
    pub c2: Float,
    /// The inertia weight $`w`$ which scales the carried-over velocity.
    pub w: Float,
    /// The number of neighbors (including the particle itself) in each neighborhood.
    pub k: usize,
    /// The norm used to find the nearest neighbors.
    pub p: Norm,
}

impl Options {
    /// Reads and checks the options from a raw [`OptionMap`] for a swarm of `n_particles`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] naming every absent key, or
    /// [`ConfigError::InvalidRange`] if `k` is not an integer in `[1, n_particles - 1]`, if `p`
    /// is not `1` or `2`, or if any weight is not finite.
    pub fn from_map(map: &OptionMap, n_particles: usize) -> Result<Self, ConfigError> {
        let keys = map.missing_keys();
        if !keys.is_empty() {
            return Err(ConfigError::MissingOption { keys });
        }
        let get = |key: &str| map.get(key).unwrap_or(Float::NAN);
        let (c1, c2, w, k, p) = (get("c1"), get("c2"), get("w"), get("k"), get("p"));
        let max_k = n_particles.saturating_sub(1);
        if !(k.fract() == 0.0 && k >= 1.0 && k <= max_k as Float) {
            return Err(ConfigError::InvalidRange(format!(
                "the number of neighbors k = {} must be an integer in [1, {}]",
                k, max_k
            )));
        }
        let p = Norm::from_order(p).ok_or_else(|| {
            ConfigError::InvalidRange(format!(
                "the norm order p = {} must be either 1 (Manhattan) or 2 (Euclidean)",
                p
            ))
        })?;
        for (name, value) in [("c1", c1), ("c2", c2), ("w", w)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidRange(format!(
                    "the weight {} = {} must be finite",
                    name, value
                )));
            }
        }
        Ok(Self {
            c1,
            c2,
            w,
            k: k as usize,
            p,
        })
    }
}
