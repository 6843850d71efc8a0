//! Advice gathering with a static fallback

use log::warn;

use super::Advisor;
use crate::summary::ProjectionBundle;

/// Number of advice lines every report carries
pub const ADVICE_COUNT: usize = 5;

const PROFESSIONAL_ADVICE: &str =
    "Considere buscar asesoría financiera profesional para desarrollar una estrategia personalizada.";

const CLOSING_ADVICE: &str = "Recuerde que el tiempo es su mejor aliado en la planificación de su \
    jubilación. El interés compuesto puede multiplicar significativamente sus ahorros, por lo que \
    cada peso ahorrado hoy trabajará para usted durante muchos años, construyendo un futuro \
    financiero más sólido.";

/// Ask the advisor and always come back with exactly `ADVICE_COUNT` lines
///
/// Advisor errors and empty answers fall back to the static list. Short
/// answers are padded, the last slot being the closing message.
pub fn advice_or_fallback(advisor: &dyn Advisor, bundle: &ProjectionBundle) -> Vec<String> {
    let mut advice: Vec<String> = match advisor.advise(bundle) {
        Ok(lines) => lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
        Err(e) => {
            warn!("Advisor failed, using fallback advice: {}", e);
            return fallback_advice(bundle);
        }
    };

    if advice.is_empty() {
        warn!("Advisor returned no advice, using fallback advice");
        return fallback_advice(bundle);
    }

    while advice.len() < ADVICE_COUNT {
        let filler = if advice.len() == ADVICE_COUNT - 1 {
            CLOSING_ADVICE
        } else {
            PROFESSIONAL_ADVICE
        };
        advice.push(filler.to_string());
    }
    advice.truncate(ADVICE_COUNT);
    advice
}

/// Static advice built from age, projected pension and gap
pub fn fallback_advice(bundle: &ProjectionBundle) -> Vec<String> {
    let age = bundle.profile.current_age.trunc() as i64;
    let pension = bundle.post_reform.total_pension();
    let gap = bundle.target.monthly_gap;

    vec![
        format!(
            "Considerando su edad actual de {} años, le recomendamos aumentar sus ahorros voluntarios \
             en un 15% de su salario mensual para reducir la brecha previsional.",
            age
        ),
        "Evalúe la posibilidad de diversificar sus inversiones a través de APV en fondos mutuos o \
         similares, lo que podría mejorar su rentabilidad a largo plazo."
            .to_string(),
        format!(
            "Con una pensión proyectada de {}, sugerimos revisar sus gastos futuros y considerar \
             estrategias adicionales de ahorro para mantener su nivel de vida.",
            format_clp(pension)
        ),
        format!(
            "Para cubrir la brecha de {}, considere asesorarse con un experto financiero para \
             desarrollar un plan de inversión personalizado.",
            format_clp(gap)
        ),
        CLOSING_ADVICE.to_string(),
    ]
}

/// Format an amount as whole Chilean pesos: `$1.234.567`
pub fn format_clp(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::summary::tests::sample_bundle;

    struct FixedAdvisor(Result<Vec<String>, ServiceError>);

    impl Advisor for FixedAdvisor {
        fn advise(&self, _bundle: &ProjectionBundle) -> Result<Vec<String>, ServiceError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(0.0), "$0");
        assert_eq!(format_clp(999.4), "$999");
        assert_eq!(format_clp(1_000.0), "$1.000");
        assert_eq!(format_clp(1_234_567.5), "$1.234.568");
        assert_eq!(format_clp(-25_000.0), "-$25.000");
        assert_eq!(format_clp(f64::NAN), "$0");
    }

    #[test]
    fn test_advisor_failure_uses_fallback() {
        let bundle = sample_bundle();
        let advisor = FixedAdvisor(Err(ServiceError::Unavailable("timeout".to_string())));

        let advice = advice_or_fallback(&advisor, &bundle);

        assert_eq!(advice, fallback_advice(&bundle));
        assert_eq!(advice.len(), ADVICE_COUNT);
        assert!(advice[0].contains("41 años"));
        assert!(advice[2].contains(&format_clp(bundle.post_reform.total_pension())));
    }

    #[test]
    fn test_empty_advice_uses_fallback() {
        let bundle = sample_bundle();
        let advisor = FixedAdvisor(Ok(vec!["   ".to_string()]));

        assert_eq!(advice_or_fallback(&advisor, &bundle), fallback_advice(&bundle));
    }

    #[test]
    fn test_short_advice_is_padded() {
        let bundle = sample_bundle();
        let advisor = FixedAdvisor(Ok(vec!["Ahorre más.".to_string(), "Revise su APV.".to_string()]));

        let advice = advice_or_fallback(&advisor, &bundle);

        assert_eq!(advice.len(), ADVICE_COUNT);
        assert_eq!(advice[0], "Ahorre más.");
        assert_eq!(advice[2], PROFESSIONAL_ADVICE);
        assert_eq!(advice[4], CLOSING_ADVICE);
    }

    #[test]
    fn test_long_advice_is_truncated() {
        let bundle = sample_bundle();
        let lines: Vec<String> = (1..=8).map(|i| format!("Consejo {i}")).collect();

        let advice = advice_or_fallback(&FixedAdvisor(Ok(lines)), &bundle);

        assert_eq!(advice.len(), ADVICE_COUNT);
        assert_eq!(advice[4], "Consejo 5");
    }
}
