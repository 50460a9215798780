use crate::Commands;
use hierscope_core::TypeHierarchyEngine;
use hierscope_core::config::ReaderStrategy;
use hierscope_core::error::Result;
use hierscope_java::scan::project_classes;
use hierscope_java::{ProjectLayout, ProjectRegistry, reader_factory};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "query", rename_all = "lowercase")]
pub enum Report {
    Supertype {
        class: String,
        supertype: Option<String>,
    },
    Interfaces {
        class: String,
        interfaces: Option<Vec<String>>,
    },
    Extends {
        class: String,
        ancestor: String,
        result: bool,
    },
    Implements {
        class: String,
        interface: String,
        result: bool,
    },
    Hierarchy {
        class: String,
        superclasses: Vec<String>,
        interfaces: Vec<String>,
    },
    Subtypes {
        target: String,
        subtypes: Vec<String>,
    },
}

#[derive(Tabled)]
struct HierarchyRow {
    #[tabled(rename = "Relation")]
    relation: &'static str,
    #[tabled(rename = "Type")]
    name: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Supertype { supertype, .. } => {
                write!(f, "{}", supertype.as_deref().unwrap_or("-"))
            }
            Report::Interfaces { class, interfaces } => match interfaces {
                Some(interfaces) => write!(f, "{}", interfaces.join("\n")),
                None => write!(f, "{} could not be resolved", class),
            },
            Report::Extends { result, .. } | Report::Implements { result, .. } => {
                write!(f, "{}", result)
            }
            Report::Hierarchy {
                superclasses,
                interfaces,
                ..
            } => {
                let rows = superclasses
                    .iter()
                    .map(|name| HierarchyRow {
                        relation: "extends",
                        name: name.clone(),
                    })
                    .chain(interfaces.iter().map(|name| HierarchyRow {
                        relation: "implements",
                        name: name.clone(),
                    }));
                write!(f, "{}", Table::new(rows).with(Style::psql()))
            }
            Report::Subtypes { subtypes, .. } => write!(f, "{}", subtypes.join("\n")),
        }
    }
}

/// Run one command against a fresh engine over `layout`.
pub(crate) fn execute(
    command: &Commands,
    layout: ProjectLayout,
    strategy: ReaderStrategy,
) -> Result<Report> {
    let registry = Arc::new(ProjectRegistry::new());
    let project = registry.register(layout.clone());
    let engine = TypeHierarchyEngine::new(reader_factory(strategy, registry));

    let report = match command {
        Commands::Supertype { class } => Report::Supertype {
            supertype: engine.get_supertype(&project, class)?,
            class: class.clone(),
        },
        Commands::Interfaces { class } => Report::Interfaces {
            interfaces: engine.get_interfaces(&project, class)?,
            class: class.clone(),
        },
        Commands::Extends { class, ancestor } => Report::Extends {
            result: engine.does_extend(&project, class, ancestor)?,
            class: class.clone(),
            ancestor: ancestor.clone(),
        },
        Commands::Implements { class, interface } => Report::Implements {
            result: engine.does_implement(&project, class, interface)?,
            class: class.clone(),
            interface: interface.clone(),
        },
        Commands::Hierarchy { class } => Report::Hierarchy {
            superclasses: engine.superclass_chain(&project, class)?,
            interfaces: engine.all_interfaces(&project, class)?,
            class: class.clone(),
        },
        Commands::Subtypes { target } => {
            let candidates = project_classes(&layout, strategy);
            tracing::info!(
                "scanning {} classes for subtypes of {}",
                candidates.len(),
                target
            );
            let target = target.trim();
            let mut subtypes: Vec<String> = candidates
                .par_iter()
                .map(|candidate| -> Result<Option<String>> {
                    let class = candidate.to_qualified();
                    if class == target {
                        return Ok(None);
                    }
                    let is_subtype = engine.does_extend(&project, &class, target)?
                        || engine.does_implement(&project, &class, target)?;
                    Ok(is_subtype.then_some(class))
                })
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .flatten()
                .collect();
            subtypes.sort();
            Report::Subtypes {
                target: target.to_string(),
                subtypes,
            }
        }
    };

    let stats = engine.cache_stats(&project);
    tracing::debug!("decoded {} classes", stats.cached_elements);
    Ok(report)
}
