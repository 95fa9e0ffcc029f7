use aggral_core::schema::db::{Table, Type};
use aggral_core::schema::domain::{self, ClassDesc, FieldDesc, TypeDesc};
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

fn build(classes: &[ClassDesc], root: &str) -> Schema {
    let domain = domain::Schema::from_classes(classes).unwrap();
    let root = domain.model_by_name(root).unwrap().id;
    Schema::builder().build(domain, root, &Dialect::SQLITE).unwrap()
}

fn column_names(table: &Table) -> Vec<&str> {
    table
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect()
}

fn unique_column_names(table: &Table) -> Vec<Vec<&str>> {
    table
        .uniques
        .iter()
        .map(|unique| {
            unique
                .columns
                .iter()
                .map(|&column| table.column(column).name.as_str())
                .collect()
        })
        .collect()
}

#[test]
fn primitive_list_junction_preserves_order() {
    let schema = build(
        &[class(
            "Survey",
            &["AggregateRoot"],
            vec![field("answers", TypeDesc::list(TypeDesc::named("int")))],
        )],
        "Survey",
    );

    let junction = schema.db.table_by_name("surveys_answers_items").unwrap();
    assert_eq!(column_names(junction), ["surveys_id", "position", "value"]);
    assert_eq!(junction.column_by_name("position").unwrap().ty, Type::Integer(8));
    assert_eq!(
        unique_column_names(junction),
        [["surveys_id", "position"]]
    );
}

#[test]
fn primitive_set_junction_constrains_membership() {
    let schema = build(
        &[class(
            "Survey",
            &["AggregateRoot"],
            vec![field("tags", TypeDesc::set(TypeDesc::named("String")))],
        )],
        "Survey",
    );

    let junction = schema.db.table_by_name("surveys_tags_items").unwrap();
    assert_eq!(column_names(junction), ["surveys_id", "value"]);
    assert_eq!(unique_column_names(junction), [["surveys_id", "value"]]);
}

#[test]
fn primitive_map_junction_keys_by_map_key() {
    let schema = build(
        &[class(
            "Survey",
            &["AggregateRoot"],
            vec![field(
                "scores",
                TypeDesc::map(TypeDesc::named("String"), TypeDesc::named("int")),
            )],
        )],
        "Survey",
    );

    let junction = schema.db.table_by_name("surveys_scores_items").unwrap();
    assert_eq!(column_names(junction), ["surveys_id", "map_key", "value"]);
    assert_eq!(junction.column_by_name("map_key").unwrap().ty, Type::Text);
    assert_eq!(junction.column_by_name("value").unwrap().ty, Type::Integer(8));
    assert_eq!(unique_column_names(junction), [["surveys_id", "map_key"]]);
}

#[test]
fn value_object_list_junction_flattens_the_element() {
    let schema = build(
        &[
            class(
                "Payroll",
                &["AggregateRoot"],
                vec![field("payments", TypeDesc::list(TypeDesc::named("Money")))],
            ),
            class(
                "Money",
                &["Value"],
                vec![
                    field("amount", TypeDesc::named("double")),
                    field("currency", TypeDesc::named("String")),
                ],
            ),
        ],
        "Payroll",
    );

    // One column per value-object field replaces the single value column
    let junction = schema.db.table_by_name("payrolls_payments_items").unwrap();
    assert_eq!(
        column_names(junction),
        ["payrolls_id", "position", "amount", "currency"]
    );
    assert_eq!(
        unique_column_names(junction),
        [["payrolls_id", "position"]]
    );
    assert!(junction.primary_key_column().is_none());
}

#[test]
fn value_object_set_junction_constrains_the_flattened_member() {
    let schema = build(
        &[
            class(
                "Wallet",
                &["AggregateRoot"],
                vec![field("holdings", TypeDesc::set(TypeDesc::named("Money")))],
            ),
            class(
                "Money",
                &["Value"],
                vec![
                    field("amount", TypeDesc::named("double")),
                    field("currency", TypeDesc::named("String")),
                ],
            ),
        ],
        "Wallet",
    );

    // No position column; membership uniqueness spans every flattened column
    let junction = schema.db.table_by_name("wallets_holdings_items").unwrap();
    assert_eq!(column_names(junction), ["wallets_id", "amount", "currency"]);
    assert_eq!(
        unique_column_names(junction),
        [["wallets_id", "amount", "currency"]]
    );
    assert!(junction.primary_key_column().is_none());
}

#[test]
fn value_object_map_junction_keys_by_map_key() {
    let schema = build(
        &[
            class(
                "Ledger",
                &["AggregateRoot"],
                vec![field(
                    "balances",
                    TypeDesc::map(TypeDesc::named("String"), TypeDesc::named("Money")),
                )],
            ),
            class(
                "Money",
                &["Value"],
                vec![
                    field("amount", TypeDesc::named("double")),
                    field("currency", TypeDesc::named("String")),
                ],
            ),
        ],
        "Ledger",
    );

    let junction = schema.db.table_by_name("ledgers_balances_items").unwrap();
    assert_eq!(
        column_names(junction),
        ["ledgers_id", "map_key", "amount", "currency"]
    );
    assert_eq!(junction.column_by_name("map_key").unwrap().ty, Type::Text);
    assert_eq!(unique_column_names(junction), [["ledgers_id", "map_key"]]);
}

#[test]
fn entity_list_gets_a_position_on_its_own_table() {
    let schema = build(
        &[
            class(
                "Playlist",
                &["AggregateRoot"],
                vec![field("entries", TypeDesc::list(TypeDesc::named("Entry")))],
            ),
            class(
                "Entry",
                &["Entity"],
                vec![field("title", TypeDesc::named("String"))],
            ),
        ],
        "Playlist",
    );

    // Ordered entity collections stay full entity tables; ordering lives in
    // a position column constrained per parent
    let entries = schema.db.table_by_name("entries").unwrap();
    assert_eq!(
        column_names(entries),
        ["id", "playlists_id", "position", "title"]
    );
    assert_eq!(entries.primary_key_column().unwrap().name, "id");
    assert_eq!(
        unique_column_names(entries),
        [["playlists_id", "position"]]
    );
}

#[test]
fn entity_map_gets_a_map_key_on_its_own_table() {
    let schema = build(
        &[
            class(
                "Roster",
                &["AggregateRoot"],
                vec![field(
                    "players",
                    TypeDesc::map(TypeDesc::named("String"), TypeDesc::named("Player")),
                )],
            ),
            class(
                "Player",
                &["Entity"],
                vec![field("name", TypeDesc::named("String"))],
            ),
        ],
        "Roster",
    );

    let players = schema.db.table_by_name("players").unwrap();
    assert_eq!(column_names(players), ["id", "rosters_id", "map_key", "name"]);
    assert_eq!(unique_column_names(players), [["rosters_id", "map_key"]]);
}

#[test]
fn aggregate_root_set_stores_identifiers() {
    let schema = build(
        &[
            class(
                "Order",
                &["AggregateRoot"],
                vec![field("watchers", TypeDesc::set(TypeDesc::named("User")))],
            ),
            class(
                "User",
                &["AggregateRoot"],
                vec![field("name", TypeDesc::named("String"))],
            ),
        ],
        "Order",
    );

    // Collections of other aggregates hold plain identifier values
    assert!(schema.db.table_by_name("users").is_none());

    let junction = schema.db.table_by_name("orders_watchers_items").unwrap();
    assert_eq!(column_names(junction), ["orders_id", "value"]);
    assert_eq!(junction.column_by_name("value").unwrap().ty, Type::Text);
    assert!(junction.foreign_keys.len() == 1);
}

#[test]
fn table_name_prefix_applies_to_junction_tables() {
    let domain = domain::Schema::from_classes(&[class(
        "Survey",
        &["AggregateRoot"],
        vec![field("tags", TypeDesc::set(TypeDesc::named("String")))],
    )])
    .unwrap();
    let root = domain.model_by_name("Survey").unwrap().id;

    let mut builder = Schema::builder();
    builder.table_name_prefix("app_");
    let schema = builder.build(domain, root, &Dialect::SQLITE).unwrap();

    assert!(schema.db.table_by_name("app_surveys").is_some());
    assert!(schema.db.table_by_name("app_surveys_tags_items").is_some());
}
