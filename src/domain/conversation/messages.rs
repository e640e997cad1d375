//! User-facing Spanish texts: prompts, rejections and the valuation report.

use crate::domain::foundation::{format_thousands, ValidationError};
use crate::domain::valuation::{
    Coordinates, MarketComparison, MarketPosition, ResolutionError, Valuation,
};
use crate::ports::ModelQuality;

/// Number of cities listed in the city prompt.
pub const CITY_PREVIEW_LIMIT: usize = 15;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub(crate) const AREA_PROMPT: &str =
    "📐 **¿Cuál es el área total de la propiedad en metros cuadrados (m²)?**";
pub(crate) const COORDINATES_CHOICE_FIELD: &str = "coordinates_choice";
pub(crate) const RESTART_CHOICE_FIELD: &str = "restart_choice";

pub fn welcome() -> String {
    format!(
        "🏠 ¡Bienvenido al Sistema de Valoración Inmobiliaria!\n\n\
         Soy tu asistente virtual y te ayudaré a estimar el valor de tu propiedad.\n\n\
         Voy a hacerte algunas preguntas sobre la propiedad. ¡Empecemos!\n\n\
         {AREA_PROMPT}"
    )
}

pub fn area_accepted(area: f64) -> String {
    format!("✅ Perfecto, {area} m² registrados.\n\n🛏️ **¿Cuántas habitaciones tiene la propiedad?**")
}

pub fn rooms_accepted(rooms: u32) -> String {
    format!("✅ {rooms} habitación(es) registradas.\n\n🚿 **¿Cuántos baños tiene la propiedad?**")
}

pub fn bathrooms_accepted(bathrooms: u32, total_cities: usize, city_preview: &str) -> String {
    format!(
        "✅ {bathrooms} baño(s) registrado(s).\n\n\
         📍 **¿En qué ciudad se encuentra la propiedad?**\n\n\
         Algunas opciones ({total_cities} disponibles):\n{city_preview}\n\n\
         💡 Escribe el número o el nombre de la ciudad (ejemplo: 2 o Medellín)"
    )
}

pub fn city_accepted(city: &str, department: &str) -> String {
    format!(
        "✅ Ciudad: {city}, {department}\n\n\
         🗺️ **¿Conoces las coordenadas geográficas exactas de la propiedad?**\n\
         _(Responde 'sí' o 'no')_"
    )
}

pub fn city_not_found(error: &ResolutionError) -> String {
    let mut message = format!("❌ No encontré la ciudad '{}'.", error.input);
    if error.suggestions.is_empty() {
        message.push_str("\n\nPor favor escribe el número o el nombre completo de la ciudad.");
    } else {
        message.push_str("\n\n¿Quisiste decir alguna de estas?\n");
        message.push_str(&numbered(&error.suggestions));
    }
    message
}

pub fn latitude_prompt() -> String {
    "📍 **¿Cuál es la latitud?**\n_(Debe estar entre -4.3 y 13.5 para Colombia)_".to_string()
}

pub fn latitude_accepted(latitude: f64) -> String {
    format!("✅ Latitud: {latitude}\n\n📍 **¿Cuál es la longitud?**")
}

pub fn longitude_accepted(longitude: f64, type_options: &str) -> String {
    format!("✅ Longitud: {longitude}\n\n{}", property_type_prompt(type_options))
}

pub fn coordinates_estimated(city: &str, coordinates: Coordinates, type_options: &str) -> String {
    format!(
        "✅ Usaré coordenadas aproximadas de {city}: ({:.2}, {:.2})\n\n{}",
        coordinates.latitude,
        coordinates.longitude,
        property_type_prompt(type_options)
    )
}

fn property_type_prompt(type_options: &str) -> String {
    format!(
        "🏘️ **¿Qué tipo de propiedad es?**\n\n{type_options}\n\n\
         💡 Escribe el número o el nombre del tipo de propiedad"
    )
}

pub fn property_type_not_found(type_options: &str) -> String {
    format!(
        "❌ Tipo de propiedad no reconocido.\n\nOpciones válidas:\n{type_options}\n\n\
         💡 Escribe el número o el nombre"
    )
}

pub fn yes_no_expected() -> String {
    "❌ Por favor responde 'sí' o 'no'".to_string()
}

/// Rejection text for a field that failed to parse or fell out of range.
pub fn invalid_answer(error: &ValidationError) -> String {
    match error {
        ValidationError::Range { field, min, max, .. } => match field.as_str() {
            "area" => format!(
                "🚫 El área debe estar entre {min} y {max} m². Por favor ingresa un valor válido."
            ),
            "rooms" => format!(
                "🚫 El número de habitaciones debe estar entre {min} y {max}. \
                 Por favor ingresa un valor válido."
            ),
            "bathrooms" => format!(
                "🚫 El número de baños debe estar entre {min} y {max}. \
                 Por favor ingresa un valor válido."
            ),
            "latitude" => format!(
                "🚫 La latitud debe estar entre {min} y {max} para Colombia. \
                 Por favor verifica el valor."
            ),
            "longitude" => format!(
                "🚫 La longitud debe estar entre {min} y {max} para Colombia. \
                 Por favor verifica el valor."
            ),
            other => format!("🚫 El valor de '{other}' debe estar entre {min} y {max}."),
        },
        ValidationError::Parse { field, .. } => match field.as_str() {
            "area" => "❌ Parece que tu entrada no es un número válido. \
                       Por favor ingresa el área en m² (ejemplo: 85 o 120.5)"
                .to_string(),
            "rooms" => "❌ Por favor ingresa un número entero válido (ejemplo: 3 o 2)".to_string(),
            "bathrooms" => {
                "❌ Por favor ingresa un número entero válido (ejemplo: 2 o 1)".to_string()
            }
            "latitude" => {
                "❌ Por favor ingresa un número válido (ejemplo: 4.60 o -74.08)".to_string()
            }
            "longitude" => {
                "❌ Por favor ingresa un número válido (ejemplo: -74.08 o -75.5)".to_string()
            }
            _ => yes_no_expected(),
        },
    }
}

fn restart_question() -> &'static str {
    "¿Deseas valorar otra propiedad? (responde 'sí' o 'no')"
}

/// Full report for a successful valuation, ending with the restart question.
pub fn valuation_report(valuation: &Valuation, quality: Option<ModelQuality>) -> String {
    let profile = &valuation.profile;
    let mut report = format!(
        "🎉 **VALORACIÓN COMPLETADA**\n\n{RULE}\n\n\
         📋 **Resumen de la Propiedad:**\n\
         \u{20}  • Tipo: {}\n\
         \u{20}  • Área: {:.0} m²\n\
         \u{20}  • Habitaciones: {}\n\
         \u{20}  • Baños: {}\n\
         \u{20}  • Ubicación: {}, {}\n\
         \u{20}  • Categoría: {} - {}\n\n\
         💰 **PRECIO ESTIMADO:** ${} COP\n\
         💵 **Precio por m²:** ${} COP/m²\n\n",
        profile.property_type,
        profile.area,
        profile.rooms,
        profile.bathrooms,
        profile.city,
        profile.department,
        profile.size_category,
        profile.price_category,
        format_thousands(valuation.estimated_price),
        format_thousands(valuation.estimated_price_per_area()),
    );

    if let Some(quality) = quality {
        report.push_str(&format!(
            "🎯 Precisión del modelo: MAPE = {:.2}%, R² = {:.4}\n\n",
            quality.mape_percent, quality.r_squared
        ));
    }

    if let Some(comparison) = &valuation.comparison {
        report.push_str(&market_section(comparison));
    }

    report.push_str(&format!("{RULE}\n\n{}", restart_question()));
    report
}

fn market_section(comparison: &MarketComparison) -> String {
    let verdict = match comparison.position {
        MarketPosition::WithinRange => {
            "✅ Tu propiedad está dentro del rango normal del mercado".to_string()
        }
        MarketPosition::AboveAverage => format!(
            "📈 Tu propiedad está {:.1}% por encima del promedio",
            comparison.deviation_percent
        ),
        MarketPosition::BelowAverage => format!(
            "📉 Tu propiedad está {:.1}% por debajo del promedio",
            comparison.deviation_percent.abs()
        ),
    };
    format!(
        "📊 **Comparación con el Mercado:**\n\
         \u{20}  • Propiedades similares: {}\n\
         \u{20}  • Precio promedio: ${} COP\n\
         \u{20}  • Rango: ${} - ${} COP\n\n{verdict}\n\n",
        comparison.count,
        format_thousands(comparison.mean_price),
        format_thousands(comparison.min_price),
        format_thousands(comparison.max_price),
    )
}

pub fn prediction_failed(reason: &str) -> String {
    format!("❌ Error al realizar la predicción: {reason}\n\n{}", restart_question())
}

pub fn farewell() -> String {
    "¡Gracias por usar Sales-Predictor! 🏠\n\nEspero haberte ayudado. ¡Hasta pronto! 👋".to_string()
}

pub fn conversation_over() -> String {
    "La conversación ha terminado. ¡Hasta pronto! 👋".to_string()
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("   {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rejections {
        use super::*;

        #[test]
        fn range_message_names_the_bounds() {
            let err = ValidationError::range("area", 10.0, 2000.0, 5.0);
            assert_eq!(
                invalid_answer(&err),
                "🚫 El área debe estar entre 10 y 2000 m². Por favor ingresa un valor válido."
            );
        }

        #[test]
        fn latitude_range_keeps_decimals() {
            let err = ValidationError::range("latitude", -4.3, 13.5, 20.0);
            assert!(invalid_answer(&err).contains("entre -4.3 y 13.5"));
        }

        #[test]
        fn parse_message_gives_an_example() {
            let err = ValidationError::parse("area", "abc", "not a number");
            assert!(invalid_answer(&err).contains("ejemplo: 85 o 120.5"));
        }

        #[test]
        fn city_not_found_lists_suggestions() {
            let err = ResolutionError {
                kind: "city".to_string(),
                input: "Medel".to_string(),
                suggestions: vec!["Medellín".to_string()],
            };
            let message = city_not_found(&err);
            assert!(message.contains("¿Quisiste decir alguna de estas?"));
            assert!(message.contains("   1. Medellín"));
        }

        #[test]
        fn city_not_found_without_suggestions_asks_again() {
            let err = ResolutionError {
                kind: "city".to_string(),
                input: "Zzzxyz".to_string(),
                suggestions: vec![],
            };
            assert!(city_not_found(&err).contains("nombre completo de la ciudad"));
        }
    }

    mod prompts {
        use super::*;

        #[test]
        fn welcome_ends_with_area_prompt() {
            assert!(welcome().ends_with(AREA_PROMPT));
        }

        #[test]
        fn estimated_coordinates_use_two_decimals() {
            let message = coordinates_estimated("Cali", Coordinates::new(3.4516, -76.532), "   1. Casa");
            assert!(message.contains("(3.45, -76.53)"));
            assert!(message.contains("   1. Casa"));
        }

        #[test]
        fn prediction_failure_asks_to_restart() {
            let message = prediction_failed("boom");
            assert!(message.contains("boom"));
            assert!(message.ends_with(restart_question()));
        }
    }

    mod report {
        use super::*;
        use crate::domain::valuation::{PriceCategory, PropertyProfile, SizeCategory};

        fn valuation(comparison: Option<MarketComparison>) -> Valuation {
            Valuation {
                profile: PropertyProfile {
                    area: 85.0,
                    rooms: 3,
                    bathrooms: 2,
                    city: "Medellín".to_string(),
                    department: "Antioquia".to_string(),
                    latitude: 6.25,
                    longitude: -75.56,
                    property_type: "Apartamento".to_string(),
                    size_category: SizeCategory::Medium,
                    price_category: PriceCategory::Medium,
                    price_per_area: 3_000_000.0,
                },
                estimated_price: 255_000_000.0,
                comparison,
            }
        }

        #[test]
        fn renders_summary_and_money() {
            let report = valuation_report(&valuation(None), None);
            assert!(report.contains("• Tipo: Apartamento"));
            assert!(report.contains("• Área: 85 m²"));
            assert!(report.contains("• Categoría: Mediana - Media"));
            assert!(report.contains("$255,000,000 COP"));
            assert!(report.contains("$3,000,000 COP/m²"));
            assert!(!report.contains("Comparación con el Mercado"));
            assert!(report.ends_with(restart_question()));
        }

        #[test]
        fn includes_market_section_when_comparable() {
            let comparison = MarketComparison::from_prices(255_000_000.0, &[200_000_000.0]);
            let report = valuation_report(&valuation(comparison), None);
            assert!(report.contains("• Propiedades similares: 1"));
            assert!(report.contains("27.5% por encima del promedio"));
        }

        #[test]
        fn includes_model_quality_when_known() {
            let quality = ModelQuality {
                mape_percent: 0.8,
                r_squared: 0.9899,
            };
            let report = valuation_report(&valuation(None), Some(quality));
            assert!(report.contains("MAPE = 0.80%, R² = 0.9899"));
        }
    }
}
