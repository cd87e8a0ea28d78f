//! Shared test fixtures for orm-gen tests.

use orm_define::{Attribute, AttributeMapping, ClassDescriptor, ClassKind, ClassMembers, Metamodel};

/// Package used by every fixture model.
pub const PACKAGE: &str = "com.example";

/// Creates an entity with basic attributes given as `(name, type)` pairs.
pub fn entity_with(name: &str, attributes: &[(&str, &str)]) -> ClassDescriptor {
    let mut class = ClassDescriptor::new(name, ClassKind::Entity);
    class.attributes = attributes
        .iter()
        .map(|(attr, java_type)| Attribute::new(*attr, *java_type))
        .collect();
    class
}

/// Creates a metamodel in [`PACKAGE`] holding `classes`.
pub fn make_model(classes: Vec<ClassDescriptor>) -> Metamodel {
    let mut model = Metamodel::new(PACKAGE);
    model.classes = classes;
    model
}

/// A `Person` entity with an id, a name and an age, all used by the three
/// generated methods.
pub fn person() -> ClassDescriptor {
    let mut person = entity_with("Person", &[("id", "Long"), ("name", "String"), ("age", "int")]);
    person.attributes[0].mapping = AttributeMapping::id();
    person.equals_method = ClassMembers::of(["name", "age"]);
    person.hash_code_method = ClassMembers::of(["name", "age"]);
    person.to_string_method = ClassMembers::of(["name", "age"]);
    person
}

/// A mapped superclass `Base` and an entity `Employee` extending it.
pub fn base_and_employee() -> Vec<ClassDescriptor> {
    let mut base = entity_with("Base", &[("id", "Long")]);
    base.kind = ClassKind::MappedSuperclass;
    base.attributes[0].mapping = AttributeMapping::id();

    let mut employee = entity_with("Employee", &[("salary", "int")]);
    employee.superclass = Some("Base".to_string());
    vec![base, employee]
}
