//! Tipos de requisição do calcore.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Modo angular das funções trigonométricas.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AngleMode {
    /// Argumentos de sin/cos/tan em graus; asin/acos/atan retornam graus.
    #[default]
    #[serde(rename = "deg", alias = "degrees")]
    Degrees,
    /// Sem conversão.
    #[serde(rename = "rad", alias = "radians")]
    Radians,
}

impl AngleMode {
    /// Retorna o outro modo.
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AngleMode::Degrees => "deg",
            AngleMode::Radians => "rad",
        }
    }
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            other => Err(format!("modo angular desconhecido: '{}' (use deg ou rad)", other)),
        }
    }
}

/// Requisição de cálculo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Expressão digitada pelo usuário.
    pub expression: String,

    /// Modo angular.
    #[serde(default)]
    pub angle_mode: AngleMode,

    /// Dígitos significativos do resultado formatado.
    #[serde(default)]
    pub precision: Option<usize>,
}

impl CalculateRequest {
    /// Cria uma nova requisição em graus.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            angle_mode: AngleMode::default(),
            precision: None,
        }
    }

    /// Define o modo angular.
    pub fn with_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Define a precisão.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_mode_parse() {
        assert_eq!("deg".parse::<AngleMode>().unwrap(), AngleMode::Degrees);
        assert_eq!("RAD".parse::<AngleMode>().unwrap(), AngleMode::Radians);
        assert_eq!(" radians ".parse::<AngleMode>().unwrap(), AngleMode::Radians);
        assert!("grad".parse::<AngleMode>().is_err());
    }

    #[test]
    fn test_angle_mode_serde() {
        assert_eq!(serde_json::to_string(&AngleMode::Degrees).unwrap(), "\"deg\"");
        let mode: AngleMode = serde_json::from_str("\"radians\"").unwrap();
        assert_eq!(mode, AngleMode::Radians);
    }

    #[test]
    fn test_calculate_request_defaults() {
        let request: CalculateRequest = serde_json::from_str(r#"{"expression":"2 + 3"}"#).unwrap();
        assert_eq!(request.angle_mode, AngleMode::Degrees);
        assert!(request.precision.is_none());

        let request = CalculateRequest::new("sin(30)")
            .with_mode(AngleMode::Radians)
            .with_precision(4);
        assert_eq!(request.angle_mode.toggled(), AngleMode::Degrees);
        assert_eq!(request.precision, Some(4));
    }
}
