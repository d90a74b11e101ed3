//! Request bodies for create/update, built once from the form values

use serde_json::{Map, Number, Value};

use super::form::{FormValues, ImageUpload};
use super::metadata::{Encoding, FieldKind};
use crate::domain::common::AggregateRoot;

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, upload: ImageUpload },
}

/// Write body in the encoding the resource expects
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(Vec<Part>),
}

impl Payload {
    pub fn build<R: AggregateRoot>(form: &FormValues) -> Self {
        let descriptor = R::descriptor();
        match descriptor.encoding {
            Encoding::Json => {
                let mut map = Map::new();
                for spec in descriptor.fields {
                    if spec.kind.is_image() {
                        if let Some(upload) = form.image(spec.name) {
                            map.insert(spec.name.to_string(), Value::String(upload.to_base64()));
                        }
                    } else {
                        let value = form.get(spec.name).trim();
                        map.insert(spec.name.to_string(), json_value(spec.kind, value));
                    }
                }
                R::decorate_json(&mut map);
                Payload::Json(Value::Object(map))
            }
            Encoding::Multipart => {
                let mut parts = Vec::with_capacity(descriptor.fields.len());
                for spec in descriptor.fields {
                    if spec.kind.is_image() {
                        if let Some(upload) = form.image(spec.name) {
                            parts.push(Part::File {
                                name: spec.name.to_string(),
                                upload: upload.clone(),
                            });
                        }
                    } else {
                        parts.push(Part::Text {
                            name: spec.name.to_string(),
                            value: form.get(spec.name).trim().to_string(),
                        });
                    }
                }
                Payload::Multipart(parts)
            }
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Json(_) => Encoding::Json,
            Self::Multipart(_) => Encoding::Multipart,
        }
    }
}

/// Number fields go out as JSON numbers when they parse
fn json_value(kind: FieldKind, value: &str) -> Value {
    if kind == FieldKind::Number {
        if let Ok(n) = value.parse::<i64>() {
            return Value::Number(n.into());
        }
        if let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_equipment::Equipment;
    use crate::domain::a003_field::Field;
    use crate::domain::a004_staff::Staff;
    use serde_json::json;

    #[test]
    fn test_json_payload_trims_values() {
        let mut form = FormValues::blank(Equipment::descriptor());
        form.set("equipmentId", " E-1 ");
        form.set("name", "Plough");
        form.set("status", "Active");
        let Payload::Json(body) = Payload::build::<Equipment>(&form) else {
            panic!("equipment is sent as JSON");
        };
        assert_eq!(body["equipmentId"], json!("E-1"));
        assert_eq!(body["name"], json!("Plough"));
        assert_eq!(body["staffId"], json!(""));
    }

    #[test]
    fn test_staff_payload_carries_empty_link_lists() {
        let form = FormValues::blank(Staff::descriptor());
        let Payload::Json(body) = Payload::build::<Staff>(&form) else {
            panic!("staff is sent as JSON");
        };
        assert_eq!(body["vehicleDtos"], json!([]));
        assert_eq!(body["equipmentDtos"], json!([]));
        assert_eq!(body["fields"], json!([]));
    }

    #[test]
    fn test_multipart_skips_unselected_images() {
        let mut form = FormValues::blank(Field::descriptor());
        form.set("fieldCode", "F-1");
        form.set("extent_size", "12.5");
        form.set_image(
            "fieldImageOne",
            Some(ImageUpload {
                file_name: "north.jpg".into(),
                mime: "image/jpeg".into(),
                bytes: vec![0xff, 0xd8],
            }),
        );
        let payload = Payload::build::<Field>(&form);
        assert_eq!(payload.encoding(), Encoding::Multipart);
        let Payload::Multipart(parts) = payload else {
            unreachable!()
        };
        let files: Vec<&str> = parts
            .iter()
            .filter_map(|p| match p {
                Part::File { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(files, vec!["fieldImageOne"]);
        assert!(parts.contains(&Part::Text {
            name: "extent_size".into(),
            value: "12.5".into()
        }));
    }

    #[test]
    fn test_number_fields_as_json_numbers() {
        assert_eq!(json_value(FieldKind::Number, "12"), json!(12));
        assert_eq!(json_value(FieldKind::Number, "12.5"), json!(12.5));
        assert_eq!(json_value(FieldKind::Number, "n/a"), json!("n/a"));
        assert_eq!(json_value(FieldKind::Text, "12"), json!("12"));
    }
}
