use aggral_core::schema::domain::{self, ClassDesc, FieldDesc, TypeDesc};
use aggral_core::schema::mapping;
use aggral_core::{Dialect, Schema};
use pretty_assertions::assert_eq;

fn class(name: &str, superclasses: &[&str], fields: Vec<FieldDesc>) -> ClassDesc {
    ClassDesc {
        name: name.to_string(),
        superclasses: superclasses.iter().map(|s| s.to_string()).collect(),
        fields,
    }
}

fn field(name: &str, ty: TypeDesc) -> FieldDesc {
    FieldDesc {
        name: name.to_string(),
        ty,
        nullable: false,
    }
}

fn nullable(name: &str, ty: TypeDesc) -> FieldDesc {
    FieldDesc {
        name: name.to_string(),
        ty,
        nullable: true,
    }
}

fn build(classes: &[ClassDesc], root: &str) -> Schema {
    let domain = domain::Schema::from_classes(classes).unwrap();
    let root = domain.model_by_name(root).unwrap().id;
    Schema::builder().build(domain, root, &Dialect::SQLITE).unwrap()
}

#[test]
fn nested_value_objects_flatten_with_the_full_field_path() {
    let schema = build(
        &[
            class(
                "Shipment",
                &["AggregateRoot"],
                vec![field("origin", TypeDesc::named("Location"))],
            ),
            class(
                "Location",
                &["Value"],
                vec![
                    field("label", TypeDesc::named("String")),
                    field("coordinates", TypeDesc::named("Coordinates")),
                ],
            ),
            class(
                "Coordinates",
                &["Value"],
                vec![
                    field("lat", TypeDesc::named("double")),
                    field("lng", TypeDesc::named("double")),
                ],
            ),
        ],
        "Shipment",
    );

    let shipments = schema.db.table_by_name("shipments").unwrap();
    let names: Vec<_> = shipments
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "id",
            "origin_label",
            "origin_coordinates_lat",
            "origin_coordinates_lng"
        ]
    );

    // Neither value object got a table
    assert_eq!(schema.db.tables.len(), 1);
}

#[test]
fn a_nullable_embedding_makes_every_flattened_column_nullable() {
    let schema = build(
        &[
            class(
                "Order",
                &["AggregateRoot"],
                vec![
                    nullable("discount", TypeDesc::named("Money")),
                    field("total", TypeDesc::named("Money")),
                ],
            ),
            class(
                "Money",
                &["Value"],
                vec![
                    field("amount", TypeDesc::named("double")),
                    nullable("currency", TypeDesc::named("String")),
                ],
            ),
        ],
        "Order",
    );

    let orders = schema.db.table_by_name("orders").unwrap();

    assert!(orders.column_by_name("discount_amount").unwrap().nullable);
    assert!(orders.column_by_name("discount_currency").unwrap().nullable);
    assert!(!orders.column_by_name("total_amount").unwrap().nullable);
    assert!(orders.column_by_name("total_currency").unwrap().nullable);
}

#[test]
fn the_same_value_object_can_embed_twice_without_colliding() {
    let schema = build(
        &[
            class(
                "Transfer",
                &["AggregateRoot"],
                vec![
                    field("source", TypeDesc::named("Account")),
                    field("destination", TypeDesc::named("Account")),
                ],
            ),
            class(
                "Account",
                &["Value"],
                vec![field("number", TypeDesc::named("String"))],
            ),
        ],
        "Transfer",
    );

    let transfers = schema.db.table_by_name("transfers").unwrap();
    assert!(transfers.column_by_name("source_number").is_some());
    assert!(transfers.column_by_name("destination_number").is_some());
}

#[test]
fn embedded_mappings_name_every_backing_column() {
    let schema = build(
        &[
            class(
                "Shipment",
                &["AggregateRoot"],
                vec![field("origin", TypeDesc::named("Location"))],
            ),
            class(
                "Location",
                &["Value"],
                vec![
                    field("label", TypeDesc::named("String")),
                    field("zip", TypeDesc::named("String")),
                ],
            ),
        ],
        "Shipment",
    );

    let shipment = schema.domain.model_by_name("Shipment").unwrap().id;
    let shipments = schema.db.table_by_name("shipments").unwrap();

    let mapping::Field::Embedded { columns } = &schema.mapping_for(shipment).fields[0] else {
        panic!("expected an embedded mapping");
    };
    let names: Vec<_> = columns
        .iter()
        .map(|&column| shipments.column(column).name.as_str())
        .collect();
    assert_eq!(names, ["origin_label", "origin_zip"]);
}

#[test]
fn a_declared_id_field_folds_into_the_primary_key() {
    let schema = build(
        &[class(
            "Customer",
            &["AggregateRoot"],
            vec![
                field("id", TypeDesc::named("UuidValue")),
                field("name", TypeDesc::named("String")),
            ],
        )],
        "Customer",
    );

    let customers = schema.db.table_by_name("customers").unwrap();
    assert_eq!(customers.columns.len(), 2);
    assert_eq!(customers.primary_key_column().unwrap().name, "id");

    let customer = schema.domain.model_by_name("Customer").unwrap().id;
    let mapped = schema.mapping_for(customer);
    assert_eq!(
        mapped.fields[0],
        mapping::Field::Scalar {
            column: customers.primary_key_column().unwrap().id
        }
    );
}
