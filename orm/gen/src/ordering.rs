//! Dependency ordering of the classes within one stage.
//!
//! A class whose direct superclass is generated in the same stage must come
//! after it. Classes are otherwise kept in declaration order.

use orm_define::{ClassDescriptor, LookupError, Metamodel};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::pipeline::Stage;

/// Verifies that no superclass chain of `classes` loops or dangles.
///
/// ## Errors
///
/// Returns [`GeneratorError::CyclicHierarchy`] for a loop and
/// [`GeneratorError::UnresolvedReference`] for an unknown superclass.
pub fn check_hierarchy(model: &Metamodel, classes: &[&ClassDescriptor], stage: Stage) -> Result<(), GeneratorError> {
    for class in classes {
        match model.ancestors(class) {
            Ok(_) => {}
            Err(LookupError::CyclicHierarchy { class }) => {
                return Err(GeneratorError::CyclicHierarchy {
                    stage: stage.to_string(),
                    classes: class,
                });
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}

/// Orders `classes` so that in-stage superclasses precede their subclasses.
///
/// The sort is stable: among classes that are ready, declaration order wins.
///
/// ## Errors
///
/// Returns [`GeneratorError::CyclicHierarchy`] naming the classes that could
/// not be placed, and [`GeneratorError::UnresolvedReference`] for an unknown
/// superclass.
pub fn order_stage<'a>(
    model: &'a Metamodel,
    classes: Vec<&'a ClassDescriptor>,
    stage: Stage,
) -> Result<Vec<&'a ClassDescriptor>, GeneratorError> {
    let mut parents: Vec<Option<&str>> = Vec::with_capacity(classes.len());
    for class in &classes {
        let parent = model.superclass_of(class)?;
        let in_stage = parent.filter(|p| classes.iter().any(|c| c.name == p.name));
        parents.push(in_stage.map(|p| p.name.as_str()));
    }

    let mut ordered: Vec<&ClassDescriptor> = Vec::with_capacity(classes.len());
    let mut placed = vec![false; classes.len()];
    while ordered.len() < classes.len() {
        let ready = (0..classes.len()).find(|&i| {
            !placed[i] && parents[i].is_none_or(|parent| ordered.iter().any(|c| c.name == parent))
        });
        match ready {
            Some(i) => {
                placed[i] = true;
                ordered.push(classes[i]);
            }
            None => {
                let stuck: Vec<&str> = classes
                    .iter()
                    .zip(&placed)
                    .filter(|(_, done)| !**done)
                    .map(|(c, _)| c.name.as_str())
                    .collect();
                return Err(GeneratorError::CyclicHierarchy {
                    stage: stage.to_string(),
                    classes: stuck.join(", "),
                });
            }
        }
    }

    debug!(
        stage = %stage,
        order = ?ordered.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "Ordered stage"
    );
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{entity_with, make_model};

    fn names(classes: &[&ClassDescriptor]) -> Vec<String> {
        classes.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn subclass_declared_first_moves_after_parent() {
        let mut child = entity_with("Child", &[]);
        child.superclass = Some("Parent".into());
        let parent = entity_with("Parent", &[]);
        let other = entity_with("Other", &[]);
        let model = make_model(vec![child, other, parent]);

        let ordered = order_stage(&model, model.classes.iter().collect(), Stage::Entities).unwrap();
        assert_eq!(names(&ordered), ["Other", "Parent", "Child"]);
    }

    #[test]
    fn out_of_stage_parent_does_not_constrain() {
        let mut child = entity_with("Child", &[]);
        child.superclass = Some("Parent".into());
        let parent = entity_with("Parent", &[]);
        let model = make_model(vec![child, parent]);

        let only_child = vec![&model.classes[0]];
        let ordered = order_stage(&model, only_child, Stage::Entities).unwrap();
        assert_eq!(names(&ordered), ["Child"]);
    }

    #[test]
    fn cycle_is_reported_with_its_members() {
        let mut a = entity_with("A", &[]);
        a.superclass = Some("B".into());
        let mut b = entity_with("B", &[]);
        b.superclass = Some("A".into());
        let free = entity_with("Free", &[]);
        let model = make_model(vec![a, b, free]);

        let err = order_stage(&model, model.classes.iter().collect(), Stage::Entities).unwrap_err();
        match err {
            GeneratorError::CyclicHierarchy { stage, classes } => {
                assert_eq!(stage, "entities");
                assert_eq!(classes, "A, B");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
        let classes: Vec<_> = model.classes.iter().collect();
        assert!(matches!(
            check_hierarchy(&model, &classes, Stage::Entities),
            Err(GeneratorError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn unknown_parent_is_unresolved() {
        let mut orphan = entity_with("Orphan", &[]);
        orphan.superclass = Some("Missing".into());
        let model = make_model(vec![orphan]);

        let err = order_stage(&model, model.classes.iter().collect(), Stage::Entities).unwrap_err();
        assert!(matches!(err, GeneratorError::UnresolvedReference(_)));
    }
}
