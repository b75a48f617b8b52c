//! Dependency ordering for variables that reference each other.
//!
//! A variable `a = "{b}-1"` can only be evaluated once `b` has a value. The
//! graph holds one edge per reference between variables of the same working
//! set; references to anything else are leaves and never become nodes.
//! Evaluation order comes from Kahn's algorithm with a name-sorted ready set,
//! so the order never depends on how the variables were stored.

use std::collections::{BTreeMap, BTreeSet};

use super::compositor::ComposedVariable;
use super::parser::placeholder_names;

/// Error returned when variables depend on each other in a loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Names on the detected cycle, sorted.
    ///
    /// Only the loop itself is reported, not variables that merely depend on
    /// it.
    pub members: Vec<String>,
}

/// Directed graph from each variable to the variables it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Builds the graph over a working set's pending variables.
    #[must_use]
    pub fn build(pending: &BTreeMap<String, ComposedVariable>) -> Self {
        Self::from_templates(
            pending
                .iter()
                .map(|(name, var)| (name.as_str(), var.template.as_str())),
        )
    }

    /// Builds the graph from `(name, template)` pairs.
    #[must_use]
    pub fn from_templates<'a, I>(variables: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let templates: BTreeMap<&str, &str> = variables.into_iter().collect();

        let dependencies = templates
            .iter()
            .map(|(name, template)| {
                let deps = placeholder_names(template)
                    .into_iter()
                    .filter(|dep| templates.contains_key(dep.as_str()))
                    .collect();
                ((*name).to_string(), deps)
            })
            .collect();

        Self { dependencies }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Returns the variables `name` references directly.
    #[must_use]
    pub fn dependencies(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(name)
    }

    /// Computes an evaluation order where every variable follows the
    /// variables it references.
    ///
    /// # Errors
    ///
    /// Returns a [`CycleError`] naming the members of a cycle if no such
    /// order exists.
    pub fn topological_order(&self) -> Result<Vec<String>, CycleError> {
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (name, deps) in &self.dependencies {
            in_degree.insert(name.as_str(), deps.len());
            for dep in deps {
                dependents.entry(dep.as_str()).or_default().push(name.as_str());
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(self.dependencies.len());

        while let Some(name) = ready.pop_first() {
            order.push(name.to_string());

            for dependent in dependents.get(name).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(*dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        if order.len() == self.dependencies.len() {
            return Ok(order);
        }

        let blocked: BTreeSet<&str> = in_degree
            .into_iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(name, _)| name)
            .collect();

        Err(CycleError {
            members: self.find_cycle(&blocked),
        })
    }

    /// Walks blocked nodes until one repeats.
    ///
    /// Every blocked node still depends on another blocked node, so starting
    /// anywhere and always following the smallest blocked dependency must
    /// close a loop.
    fn find_cycle<'a>(&'a self, blocked: &BTreeSet<&'a str>) -> Vec<String> {
        let Some(mut current) = blocked.first().copied() else {
            return Vec::new();
        };
        let mut path: Vec<&str> = Vec::new();

        loop {
            if let Some(position) = path.iter().position(|seen| *seen == current) {
                let mut members: Vec<String> =
                    path[position..].iter().map(|s| (*s).to_string()).collect();
                members.sort();
                return members;
            }
            path.push(current);

            let next = self
                .dependencies
                .get(current)
                .and_then(|deps| deps.iter().find(|dep| blocked.contains(dep.as_str())));

            match next {
                Some(dep) => current = dep.as_str(),
                None => {
                    let mut members: Vec<String> =
                        path.iter().map(|s| (*s).to_string()).collect();
                    members.sort();
                    return members;
                }
            }
        }
    }
}
