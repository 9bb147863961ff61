use crate::foundation::error::{NetreelError, NetreelResult};

/// One entry of a [`WeightSnapshot`].
///
/// In JSON a node layer is an array of numbers and a connection layer an array of arrays of
/// numbers, indexed `[previous_node][current_node]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LayerValues {
    Nodes(Vec<f64>),
    Connections(Vec<Vec<f64>>),
}

impl LayerValues {
    fn describe(&self) -> &'static str {
        match self {
            Self::Nodes(_) => "node layer",
            Self::Connections(_) => "connection layer",
        }
    }
}

/// One frame of raw data: `[conn_0, node_1, conn_1, node_2, ..., node_L]`.
///
/// The input layer is not part of the snapshot; it is synthesized from the declared input shape
/// (see [`input_node_count`]).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WeightSnapshot {
    pub layers: Vec<LayerValues>,
}

impl WeightSnapshot {
    pub fn new(layers: Vec<LayerValues>) -> Self {
        Self { layers }
    }

    /// Node layers after the input layer, in depth order.
    pub fn node_layers(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.layers.iter().skip(1).step_by(2).filter_map(|l| match l {
            LayerValues::Nodes(v) => Some(v.as_slice()),
            LayerValues::Connections(_) => None,
        })
    }

    /// Connection layers in depth order; entry `k` links node layer `k` to `k + 1`.
    pub fn connection_layers(&self) -> impl Iterator<Item = &[Vec<f64>]> + '_ {
        self.layers.iter().step_by(2).filter_map(|l| match l {
            LayerValues::Connections(m) => Some(m.as_slice()),
            LayerValues::Nodes(_) => None,
        })
    }
}

/// One entry of the declared model input shape.
///
/// Integers are dimensions; anything else (for example `null` for a batch axis) is ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum InputDim {
    Size(u64),
    Other(serde_json::Value),
}

impl From<u64> for InputDim {
    fn from(v: u64) -> Self {
        Self::Size(v)
    }
}

/// Product of the integer dimensions in `dims` (1 when there are none).
pub fn input_node_count(dims: &[InputDim]) -> NetreelResult<usize> {
    dims.iter()
        .filter_map(|d| match d {
            InputDim::Size(n) => Some(*n),
            InputDim::Other(_) => None,
        })
        .try_fold(1usize, |acc, n| {
            usize::try_from(n)
                .ok()
                .and_then(|n| acc.checked_mul(n))
                .ok_or_else(|| NetreelError::invalid_input("input shape node count overflows"))
        })
}

/// Node count per layer, input layer included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkShape {
    pub layer_sizes: Vec<usize>,
}

impl NetworkShape {
    /// Validate `snapshot` against an input layer of `input_nodes` nodes and derive its shape.
    ///
    /// Checks connection/node alternation, matrix dimensions, finiteness, and that there are at
    /// least two node layers.
    pub fn from_snapshot(snapshot: &WeightSnapshot, input_nodes: usize) -> NetreelResult<Self> {
        if input_nodes == 0 {
            return Err(NetreelError::invalid_input(
                "input layer must contain at least one node",
            ));
        }
        if snapshot.layers.is_empty() {
            return Err(NetreelError::invalid_input(
                "frame needs at least two node layers (input plus one more)",
            ));
        }
        if snapshot.layers.len() % 2 != 0 {
            return Err(NetreelError::invalid_input(
                "frame must end with a node layer",
            ));
        }

        let mut layer_sizes = Vec::with_capacity(snapshot.layers.len() / 2 + 1);
        layer_sizes.push(input_nodes);

        for (pos, pair) in snapshot.layers.chunks_exact(2).enumerate() {
            let (LayerValues::Connections(matrix), LayerValues::Nodes(nodes)) = (&pair[0], &pair[1])
            else {
                return Err(NetreelError::invalid_input(format!(
                    "entries {} and {} must be a connection layer then a node layer, got {} then {}",
                    pos * 2,
                    pos * 2 + 1,
                    pair[0].describe(),
                    pair[1].describe()
                )));
            };

            let layer = pos + 1;
            if nodes.is_empty() {
                return Err(NetreelError::invalid_input(format!(
                    "node layer {layer} is empty"
                )));
            }
            check_finite(nodes, || format!("node layer {layer}"))?;

            let prev = layer_sizes[pos];
            if matrix.len() != prev {
                return Err(NetreelError::invalid_input(format!(
                    "connection layer into node layer {layer} has {} rows, expected {prev}",
                    matrix.len()
                )));
            }
            for (row_idx, row) in matrix.iter().enumerate() {
                if row.len() != nodes.len() {
                    return Err(NetreelError::invalid_input(format!(
                        "connection row {row_idx} into node layer {layer} has {} entries, expected {}",
                        row.len(),
                        nodes.len()
                    )));
                }
                check_finite(row, || {
                    format!("connection row {row_idx} into node layer {layer}")
                })?;
            }

            layer_sizes.push(nodes.len());
        }

        Ok(Self { layer_sizes })
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn node_count(&self) -> usize {
        self.layer_sizes.iter().sum()
    }
}

fn check_finite(values: &[f64], what: impl FnOnce() -> String) -> NetreelResult<()> {
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(NetreelError::invalid_input(format!(
            "{} contains non-finite magnitude {v}",
            what()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/snapshot.rs"]
mod tests;
