//! Smoke tests for the facade re-exports.

use entity_rs::prelude::*;

fn product_schema() -> Schema {
    Schema::new()
        .property("title", PropertyDefinition::typed(PropertyType::String).required())
        .property("price", PropertyDefinition::typed(PropertyType::Double))
        .property("stock", PropertyDefinition::typed(PropertyType::Int))
        .property("image", PropertyDefinition::typed(PropertyType::Buffer))
        .property("color", PropertyDefinition::new().validate(Rule::named("isHexColor").unwrap()))
        .property("store", PropertyDefinition::typed(PropertyType::GeoPoint))
        .virtual_property("label")
}

#[test]
fn wrapped_entity_validates() {
    let schema = product_schema();
    let mut data = entity!({ "title": "Lamp", "color": "#ff8800", "label": "Lamp (red)" });
    data.insert("price".into(), DoubleValue::new(19.5).unwrap().into());
    data.insert("stock".into(), IntegerValue::new(3).into());
    data.insert("image".into(), Bytes::from_static(b"\x89PNG").into());
    data.insert("store".into(), GeoPoint::new(51.5, -0.12).unwrap().into());

    let result = validate(&mut data, &schema, "Product");
    assert!(result.is_valid(), "{:?}", result.error);
    assert_eq!(result.value.len(), 6);
}

#[test]
fn report_is_serializable() {
    let schema = product_schema();
    let mut data = entity!({ "price": "free", "color": "red" });

    let error = validate(&mut data, &schema, "Product").error.unwrap();
    let json = serde_json::to_value(&error).unwrap();

    assert_eq!(json["error"]["kind"], json!("Product"));
    assert_eq!(json["error"]["errors"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn async_contract_through_facade() {
    let schema = product_schema();
    let mut data = entity!({ "title": "" });

    let error = validate(&mut data, &schema, "Product").await.unwrap_err();
    assert_eq!(error.codes(), vec![ErrorKind::PropRequired]);
}
