//! The generation pipeline.
//!
//! A run walks the metamodel in five fixed stages:
//!
//! 1. [`Stage::Superclasses`] - mapped superclasses
//! 2. [`Stage::Entities`]
//! 3. [`Stage::Embeddables`]
//! 4. [`Stage::Identifiers`] - `@IdClass` keys, then embedded identifiers
//! 5. [`Stage::Beans`]
//!
//! Only classes with `generate_source` set take part. Every assembled class is
//! registered, then handed to an [`ArtifactWriter`].
//!
//! ## Failure Policy
//!
//! Hierarchy problems (a superclass cycle or an unknown superclass) abort the
//! run before anything is assembled. A class that fails to assemble or write
//! is logged and recorded; the rest of its stage is skipped and the run moves
//! on to the next stage. Artifacts registered earlier stay registered.

use orm_define::{ClassDescriptor, ClassKind, Metamodel};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{error, info, instrument};

use crate::assembler::ClassAssembler;
use crate::errors::GeneratorError;
use crate::options::GenerationOptions;
use crate::ordering::{check_hierarchy, order_stage};
use crate::output::{ArtifactWriter, WrittenUnit};
use crate::registry::GenerationRegistry;

/// One step of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Superclasses,
    Entities,
    Embeddables,
    Identifiers,
    Beans,
}

impl Stage {
    /// The class kinds handled by this stage, in processing order.
    pub fn kinds(self) -> &'static [ClassKind] {
        match self {
            Stage::Superclasses => &[ClassKind::MappedSuperclass],
            Stage::Entities => &[ClassKind::Entity],
            Stage::Embeddables => &[ClassKind::Embeddable],
            Stage::Identifiers => &[ClassKind::IdClass, ClassKind::EmbeddedId],
            Stage::Beans => &[ClassKind::Bean],
        }
    }

    /// Classes of this stage that generate source, in declaration order per kind.
    pub fn classes(self, model: &Metamodel) -> Vec<&ClassDescriptor> {
        self.kinds()
            .iter()
            .flat_map(|kind| model.classes_of(*kind))
            .filter(|class| class.generate_source)
            .collect()
    }
}

/// A class that produced no artifact.
#[derive(Debug)]
pub struct ClassFailure {
    pub class: String,
    pub kind: ClassKind,
    pub stage: Stage,
    pub error: GeneratorError,
}

/// Outcome of one run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub registry: GenerationRegistry,
    /// Handles returned by the writer, in write order.
    pub written: Vec<WrittenUnit>,
    pub failures: Vec<ClassFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs every stage over `model`.
///
/// ## Examples
///
/// ```
/// use orm_define::{ClassDescriptor, ClassKind, Metamodel};
/// use orm_gen::options::GenerationOptions;
/// use orm_gen::output::MemoryWriter;
/// use orm_gen::pipeline::run;
///
/// let mut model = Metamodel::new("com.example");
/// model.classes.push(ClassDescriptor::new("Order", ClassKind::Entity));
///
/// let mut writer = MemoryWriter::default();
/// let report = run(&model, &GenerationOptions::default(), &mut writer).unwrap();
///
/// assert!(report.is_success());
/// assert_eq!(report.registry.artifacts_of(ClassKind::Entity).len(), 1);
/// assert!(writer.source("com.example.Order").unwrap().contains("public class Order"));
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::CyclicHierarchy`] or
/// [`GeneratorError::UnresolvedReference`] when class hierarchies cannot be
/// ordered. Per-class failures are reported in [`GenerationReport::failures`].
#[instrument(skip_all, fields(package = %model.package, classes = model.classes.len()))]
pub fn run(
    model: &Metamodel,
    options: &GenerationOptions,
    writer: &mut dyn ArtifactWriter,
) -> Result<GenerationReport, GeneratorError> {
    let mut plan = Vec::new();
    for stage in Stage::iter() {
        let classes = stage.classes(model);
        check_hierarchy(model, &classes, stage)?;
        plan.push((stage, order_stage(model, classes, stage)?));
    }

    let mut primes = options.prime_source();
    let mut report = GenerationReport::default();

    for (stage, classes) in plan {
        if classes.is_empty() {
            info!(stage = %stage, "Skipping empty stage");
            continue;
        }
        info!(stage = %stage, classes = classes.len(), "Starting stage");

        for class in classes {
            let outcome = ClassAssembler::new(model, class, options)
                .assemble(primes.as_mut())
                .and_then(|definition| {
                    let definition = report.registry.register(definition);
                    writer.write(&definition)
                });
            match outcome {
                Ok(unit) => {
                    info!(class = %class.name, kind = %class.kind, "Generated class");
                    report.written.push(unit);
                }
                Err(err) => {
                    error!(
                        class = %class.name,
                        kind = %class.kind,
                        stage = %stage,
                        error = %err,
                        "Class generation failed; skipping the rest of the stage"
                    );
                    report.failures.push(ClassFailure {
                        class: class.name.clone(),
                        kind: class.kind,
                        stage,
                        error: err,
                    });
                    break;
                }
            }
        }
    }

    info!(
        generated = report.registry.len(),
        failed = report.failures.len(),
        "Generation finished"
    );
    Ok(report)
}
