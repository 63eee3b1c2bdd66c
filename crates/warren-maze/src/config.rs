//! Declarative maze configuration.
//!
//! Plain nested data describing how the grid's rings are carved up:
//! layers (depth-wise) contain slices (along each ring) contain fragment
//! specs (depth-wise again). Relative `weight` values are proportional,
//! not absolute - a layer weighted 2 among a total of 4 receives half
//! the rings.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{MazeError, Result};

/// Which carving algorithm a fragment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Randomized-weight frontier growth (spanning tree).
    Ring,
    /// Sidewinder-style directional growth from one wall.
    Branch,
    /// Spanning tree with dead-ends looped back into the maze.
    Braid,
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentKind::Ring => write!(f, "ring"),
            FragmentKind::Branch => write!(f, "branch"),
            FragmentKind::Braid => write!(f, "braid"),
        }
    }
}

/// Declaration of one fragment within a slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentSpec {
    /// Carving algorithm.
    pub kind: FragmentKind,
    /// Relative depth weight within the slice.
    pub weight: f64,
    /// Which sides of the fragment may connect to neighbours.
    pub connections: Vec<Direction>,
}

impl FragmentSpec {
    /// A fragment open on all four sides.
    pub fn open(kind: FragmentKind, weight: f64) -> Self {
        Self {
            kind,
            weight,
            connections: Direction::ALL.to_vec(),
        }
    }
}

/// Declaration of one layer of the maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Relative ring-count weight among all layers.
    pub weight: f64,
    /// Fragment declarations per slice, in slice order.
    pub slices: Vec<Vec<FragmentSpec>>,
    /// Relative width weight per slice; must match `slices` in length.
    pub slice_weights: Vec<f64>,
    /// Kind used for this layer's implicit leftover slice/fragment.
    pub default_kind: FragmentKind,
}

impl LayerSpec {
    /// A layer with a single full-circle slice holding one fragment.
    pub fn single(kind: FragmentKind, weight: f64) -> Self {
        Self {
            weight,
            slices: vec![vec![FragmentSpec::open(kind, 1.0)]],
            slice_weights: vec![1.0],
            default_kind: kind,
        }
    }
}

/// Top-level immutable maze configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Kind used for the implicit trailing layer (rings left over after
    /// all declared layers are consumed).
    pub default_kind: FragmentKind,
    /// Declared layers, innermost first.
    pub layers: Vec<LayerSpec>,
    /// Seed string expanded into the PRNG state.
    pub seed: String,
}

impl MazeConfig {
    /// One layer covering the whole grid with a single fragment.
    pub fn single(kind: FragmentKind, seed: impl Into<String>) -> Self {
        Self {
            default_kind: kind,
            layers: vec![LayerSpec::single(kind, 1.0)],
            seed: seed.into(),
        }
    }

    /// Check the declaration for fatal configuration mistakes.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(MazeError::NoLayers);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            check_weight(layer.weight, "layer")?;
            if layer.slices.len() != layer.slice_weights.len() {
                return Err(MazeError::SliceWeightMismatch {
                    layer: index,
                    slices: layer.slices.len(),
                    weights: layer.slice_weights.len(),
                });
            }
            for &w in &layer.slice_weights {
                check_weight(w, "slice")?;
            }
            for slice in &layer.slices {
                for fragment in slice {
                    check_weight(fragment.weight, "fragment")?;
                }
            }
        }
        Ok(())
    }
}

fn check_weight(weight: f64, context: &'static str) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(MazeError::BadWeight { weight, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_config_validates() {
        let config = MazeConfig::single(FragmentKind::Ring, "AAAAAAAA");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn no_layers_rejected() {
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![],
            seed: "AAAAAAAA".into(),
        };
        assert!(matches!(config.validate(), Err(MazeError::NoLayers)));
    }

    #[test]
    fn bad_weights_rejected() {
        let mut config = MazeConfig::single(FragmentKind::Ring, "s");
        config.layers[0].weight = 0.0;
        assert!(matches!(config.validate(), Err(MazeError::BadWeight { .. })));

        let mut config = MazeConfig::single(FragmentKind::Ring, "s");
        config.layers[0].slices[0][0].weight = f64::NAN;
        assert!(matches!(config.validate(), Err(MazeError::BadWeight { .. })));
    }

    #[test]
    fn slice_weight_mismatch_rejected() {
        let mut config = MazeConfig::single(FragmentKind::Ring, "s");
        config.layers[0].slice_weights.push(1.0);
        assert!(matches!(
            config.validate(),
            Err(MazeError::SliceWeightMismatch { layer: 0, .. })
        ));
    }

    #[test]
    fn kind_tags_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&FragmentKind::Braid).unwrap(),
            "\"braid\""
        );
        let kind: FragmentKind = serde_json::from_str("\"branch\"").unwrap();
        assert_eq!(kind, FragmentKind::Branch);
    }

    #[test]
    fn unknown_kind_tag_fails_to_parse() {
        assert!(serde_json::from_str::<FragmentKind>("\"spiral\"").is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![
                LayerSpec::single(FragmentKind::Branch, 2.0),
                LayerSpec {
                    weight: 1.0,
                    slices: vec![
                        vec![FragmentSpec::open(FragmentKind::Ring, 1.0)],
                        vec![FragmentSpec {
                            kind: FragmentKind::Braid,
                            weight: 1.0,
                            connections: vec![Direction::North, Direction::East],
                        }],
                    ],
                    slice_weights: vec![1.0, 2.0],
                    default_kind: FragmentKind::Ring,
                },
            ],
            seed: "AAAAAAAA".into(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.layers.len(), 2);
        assert_eq!(back.layers[1].slice_weights, vec![1.0, 2.0]);
    }
}
