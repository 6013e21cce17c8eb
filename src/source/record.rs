//! Decoded address records, one schema per provider.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::source::types::{FetchError, FetchResult};

/// Address as returned by ViaCEP (`/ws/{cep}/json/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

impl ViaCepAddress {
    /// Decode a ViaCEP body.
    ///
    /// ViaCEP answers unknown postal codes with `200 {"erro": true}`
    /// (older deployments send `"true"` as a string).
    pub fn from_json(body: &[u8]) -> FetchResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let unknown = match value.get("erro") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag == "true",
            _ => false,
        };
        if unknown {
            return Err(FetchError::NotFound);
        }

        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Address as returned by OpenCEP (`/v1/{cep}.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenCepAddress {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
}

impl OpenCepAddress {
    pub fn from_json(body: &[u8]) -> FetchResult<Self> {
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Provider-specific address payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum Address {
    ViaCep(ViaCepAddress),
    OpenCep(OpenCepAddress),
}

impl Address {
    pub fn provider(&self) -> &'static str {
        match self {
            Address::ViaCep(_) => "viacep",
            Address::OpenCep(_) => "opencep",
        }
    }

    pub fn postal_code(&self) -> &str {
        match self {
            Address::ViaCep(a) => &a.cep,
            Address::OpenCep(a) => &a.cep,
        }
    }

    pub fn street(&self) -> &str {
        match self {
            Address::ViaCep(a) => &a.logradouro,
            Address::OpenCep(a) => &a.logradouro,
        }
    }

    pub fn neighborhood(&self) -> &str {
        match self {
            Address::ViaCep(a) => &a.bairro,
            Address::OpenCep(a) => &a.bairro,
        }
    }

    pub fn city(&self) -> &str {
        match self {
            Address::ViaCep(a) => &a.localidade,
            Address::OpenCep(a) => &a.localidade,
        }
    }

    pub fn state(&self) -> &str {
        match self {
            Address::ViaCep(a) => &a.uf,
            Address::OpenCep(a) => &a.uf,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} - {}/{} ({})",
            self.street(),
            self.neighborhood(),
            self.city(),
            self.state(),
            self.postal_code()
        )
    }
}

/// A decoded address plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Request URL that produced this record.
    pub url: String,
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIACEP_BODY: &str = r#"{
        "cep": "22735-140",
        "logradouro": "Rua Mário Covas Júnior",
        "complemento": "",
        "bairro": "Taquara",
        "localidade": "Rio de Janeiro",
        "uf": "RJ",
        "ibge": "3304557",
        "gia": "",
        "ddd": "21",
        "siafi": "6001"
    }"#;

    #[test]
    fn test_viacep_decode() {
        let address = ViaCepAddress::from_json(VIACEP_BODY.as_bytes()).unwrap();
        assert_eq!(address.cep, "22735-140");
        assert_eq!(address.ddd, "21");
        assert_eq!(address.localidade, "Rio de Janeiro");
    }

    #[test]
    fn test_viacep_unknown_postal_code() {
        assert_eq!(
            ViaCepAddress::from_json(br#"{"erro": true}"#),
            Err(FetchError::NotFound)
        );
        assert_eq!(
            ViaCepAddress::from_json(br#"{"erro": "true"}"#),
            Err(FetchError::NotFound)
        );
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = OpenCepAddress::from_json(b"<html>busy</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = ViaCepAddress::from_json(br#"{"cep": 22735140}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let address = OpenCepAddress::from_json(br#"{"cep": "22735-140", "uf": "RJ"}"#).unwrap();
        assert_eq!(address.uf, "RJ");
        assert!(address.bairro.is_empty());
    }

    #[test]
    fn test_address_accessors_and_display() {
        let address = Address::OpenCep(OpenCepAddress {
            cep: "22735-140".into(),
            logradouro: "Rua Mário Covas Júnior".into(),
            bairro: "Taquara".into(),
            localidade: "Rio de Janeiro".into(),
            uf: "RJ".into(),
            ..Default::default()
        });

        assert_eq!(address.provider(), "opencep");
        assert_eq!(address.city(), "Rio de Janeiro");
        assert_eq!(
            address.to_string(),
            "Rua Mário Covas Júnior, Taquara - Rio de Janeiro/RJ (22735-140)"
        );
    }

    #[test]
    fn test_address_serializes_with_provider_tag() {
        let address = Address::ViaCep(ViaCepAddress::default());
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["provider"], "viacep");
    }
}
