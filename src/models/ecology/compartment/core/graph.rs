//! Transfer topology between compartments.

use std::fmt;

use crate::support::constraint::{Constrained, ConstraintError, NonNegative};

use super::CompartmentError;

/// Destination of a transfer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Another compartment in the same graph, by index.
    Compartment(usize),

    /// An external sink outside the modeled compartments.
    ///
    /// Edges into the environment remove material from the system.
    Environment,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Compartment(index) => write!(f, "{index}"),
            Target::Environment => f.write_str("environment"),
        }
    }
}

/// A directed first-order transfer between compartments.
///
/// Material leaves `from` at `rate * state[from]` per unit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferEdge {
    /// Source compartment index.
    pub from: usize,

    /// Where the transferred material goes.
    pub to: Target,

    /// First-order rate constant.
    pub rate: Constrained<f64, NonNegative>,
}

/// Named compartments and the linear transfers between them.
///
/// Compartment order is fixed at construction and defines the layout of
/// every state and derivative vector evaluated against this graph.
///
/// # Example
///
/// ```
/// use compartment_models::models::ecology::compartment::TransferGraph;
///
/// let graph = TransferGraph::new(["soil", "litter"])
///     .unwrap()
///     .transfer(1, 0, 0.5)
///     .unwrap()
///     .loss(0, 0.1)
///     .unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.index_of("litter"), Some(1));
/// assert_eq!(graph.outflow_rate(1), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferGraph {
    names: Vec<String>,
    edges: Vec<TransferEdge>,
}

impl TransferGraph {
    /// Declares the compartments of a graph with no edges.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::DuplicateName`] if a name repeats.
    pub fn new<I, S>(names: I) -> Result<Self, CompartmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if declared.contains(&name) {
                return Err(CompartmentError::DuplicateName { name });
            }
            declared.push(name);
        }

        Ok(Self {
            names: declared,
            edges: Vec::new(),
        })
    }

    /// Adds a transfer from one compartment to another.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range, if `from == to`,
    /// or if `rate` is negative, infinite, or `NaN`.
    pub fn transfer(self, from: usize, to: usize, rate: f64) -> Result<Self, CompartmentError> {
        self.with_rate(from, Target::Compartment(to), rate)
    }

    /// Adds a loss from a compartment to the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is out of range or `rate` is negative,
    /// infinite, or `NaN`.
    pub fn loss(self, from: usize, rate: f64) -> Result<Self, CompartmentError> {
        self.with_rate(from, Target::Environment, rate)
    }

    /// Adds an edge whose rate has already been checked for sign.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is out of range, the edge is a
    /// self-transfer, or the rate is infinite.
    pub fn with_edge(mut self, edge: TransferEdge) -> Result<Self, CompartmentError> {
        self.check_index(edge.from)?;
        if let Target::Compartment(to) = edge.to {
            self.check_index(to)?;
            if to == edge.from {
                return Err(CompartmentError::SelfTransfer { compartment: to });
            }
        }
        if !edge.rate.get().is_finite() {
            return Err(CompartmentError::InvalidParameter {
                from: edge.from,
                to: edge.to,
                error: ConstraintError::Infinite,
            });
        }

        self.edges.push(edge);
        Ok(self)
    }

    fn with_rate(self, from: usize, to: Target, rate: f64) -> Result<Self, CompartmentError> {
        let rate = NonNegative::new(rate)
            .map_err(|error| CompartmentError::InvalidParameter { from, to, error })?;
        self.with_edge(TransferEdge { from, to, rate })
    }

    fn check_index(&self, index: usize) -> Result<(), CompartmentError> {
        if index < self.names.len() {
            Ok(())
        } else {
            Err(CompartmentError::UnknownCompartment {
                index,
                count: self.names.len(),
            })
        }
    }

    /// Returns the number of compartments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no compartments are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Compartment names in state order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the name of the compartment at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Looks up a compartment index by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[TransferEdge] {
        &self.edges
    }

    /// Total first-order outflow rate of a compartment.
    ///
    /// Sums every edge leaving `index`, including losses to the environment.
    /// An out-of-range index has no edges and returns zero.
    #[must_use]
    pub fn outflow_rate(&self, index: usize) -> f64 {
        self.edges
            .iter()
            .filter(|edge| edge.from == index)
            .map(|edge| edge.rate)
            .sum::<Constrained<f64, NonNegative>>()
            .into_inner()
    }

    /// Returns `true` if any edge removes material from the system.
    #[must_use]
    pub fn has_losses(&self) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.to == Target::Environment && edge.rate.get() > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> TransferGraph {
        TransferGraph::new(["a", "b", "c"]).unwrap()
    }

    #[test]
    fn builds_edges_in_order() {
        let graph = chain()
            .transfer(2, 1, 5.0)
            .unwrap()
            .transfer(1, 0, 3.0)
            .unwrap()
            .loss(0, 1.0)
            .unwrap();

        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.edges()[0].from, 2);
        assert_eq!(graph.edges()[0].to, Target::Compartment(1));
        assert_eq!(graph.edges()[2].to, Target::Environment);
        assert!(graph.has_losses());
    }

    #[test]
    fn outflow_sums_parallel_edges() {
        let graph = chain()
            .transfer(0, 1, 2.0)
            .unwrap()
            .transfer(0, 2, 0.5)
            .unwrap()
            .loss(0, 0.25)
            .unwrap();

        assert_eq!(graph.outflow_rate(0), 2.75);
        assert_eq!(graph.outflow_rate(1), 0.0);
        assert_eq!(graph.outflow_rate(7), 0.0);
    }

    #[test]
    fn rejects_negative_rate() {
        let err = chain().transfer(0, 1, -3.0).unwrap_err();
        assert_eq!(
            err,
            CompartmentError::InvalidParameter {
                from: 0,
                to: Target::Compartment(1),
                error: ConstraintError::Negative,
            }
        );

        let err = chain().loss(2, f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            CompartmentError::InvalidParameter {
                to: Target::Environment,
                error: ConstraintError::NotANumber,
                ..
            }
        ));
    }

    #[test]
    fn rejects_infinite_rate() {
        let err = chain().transfer(0, 1, f64::INFINITY).unwrap_err();
        assert_eq!(
            err,
            CompartmentError::InvalidParameter {
                from: 0,
                to: Target::Compartment(1),
                error: ConstraintError::Infinite,
            }
        );

        let err = chain().loss(2, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            CompartmentError::InvalidParameter {
                to: Target::Environment,
                error: ConstraintError::Infinite,
                ..
            }
        ));

        let edge = TransferEdge {
            from: 1,
            to: Target::Compartment(2),
            rate: NonNegative::new(f64::INFINITY).unwrap(),
        };
        assert!(matches!(
            chain().with_edge(edge),
            Err(CompartmentError::InvalidParameter {
                error: ConstraintError::Infinite,
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert_eq!(
            chain().transfer(0, 3, 1.0).unwrap_err(),
            CompartmentError::UnknownCompartment { index: 3, count: 3 }
        );
        assert_eq!(
            chain().loss(9, 1.0).unwrap_err(),
            CompartmentError::UnknownCompartment { index: 9, count: 3 }
        );
        assert_eq!(
            chain().transfer(1, 1, 1.0).unwrap_err(),
            CompartmentError::SelfTransfer { compartment: 1 }
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = TransferGraph::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(
            err,
            CompartmentError::DuplicateName {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn zero_rate_loss_is_not_a_loss() {
        let graph = chain().loss(0, 0.0).unwrap();
        assert!(!graph.has_losses());
    }

    #[test]
    fn name_lookup() {
        let graph = chain();
        assert_eq!(graph.name(1), Some("b"));
        assert_eq!(graph.name(3), None);
        assert_eq!(graph.index_of("c"), Some(2));
        assert_eq!(graph.index_of("z"), None);
        assert_eq!(graph.names(), ["a", "b", "c"]);
    }
}
