use serde::{Deserialize, Serialize};

/// A client of the store as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cedula", default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(rename = "celular", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            national_id: None,
            phone: None,
            email: None,
            address: None,
        }
    }
}

/// Payload for registering a new client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCustomer {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "celular")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "direccion")]
    pub address: String,
}

impl NewCustomer {
    /// Trims every field and checks the form the way the registration screen does.
    pub fn validated(self) -> Result<Self, String> {
        let form = Self {
            name: self.name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        };

        let required = [
            ("nombre", &form.name),
            ("cedula", &form.national_id),
            ("celular", &form.phone),
            ("email", &form.email),
            ("direccion", &form.address),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(format!("{} is required", field));
        }
        if !form.email.contains('@') {
            return Err(format!("invalid email: {}", form.email));
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewCustomer {
        NewCustomer {
            name: " Ana Torres ".into(),
            national_id: "0102030405".into(),
            phone: "0991234567".into(),
            email: "ana@example.com".into(),
            address: "Av. Central 12".into(),
        }
    }

    #[test]
    fn validated_trims_fields() {
        let form = form().validated().unwrap();
        assert_eq!(form.name, "Ana Torres");
    }

    #[test]
    fn validated_rejects_blank_and_bad_email() {
        let mut blank = form();
        blank.phone = "   ".into();
        assert_eq!(blank.validated(), Err("celular is required".to_string()));

        let mut bad = form();
        bad.email = "ana.example.com".into();
        assert!(bad.validated().unwrap_err().contains("invalid email"));
    }

    #[test]
    fn listing_accepts_numeric_ids() {
        let json = r#"[{"id": 7, "nombre": "Ana", "cedula": "010"}, {"id": "8", "nombre": "Luis"}]"#;
        let customers: Vec<Customer> = serde_json::from_str(json).unwrap();
        assert_eq!(customers[0].id, "7");
        assert_eq!(customers[0].national_id.as_deref(), Some("010"));
        assert_eq!(customers[1].id, "8");
        assert_eq!(customers[1].email, None);
    }

    #[test]
    fn new_customer_uses_backend_field_names() {
        let value = serde_json::to_value(form()).unwrap();
        assert_eq!(value["nombre"], " Ana Torres ");
        assert_eq!(value["cedula"], "0102030405");
        assert_eq!(value["direccion"], "Av. Central 12");
    }
}
