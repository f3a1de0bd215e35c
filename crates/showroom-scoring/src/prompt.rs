// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a visit into the natural-language request sent to the model.
//!
//! [`build_prompt`] is a pure function: identical requests always produce
//! byte-identical prompts.

use showroom_core::{Language, VisitAnalysisRequest};

/// Domain framing sent as the system message on every model call.
pub const SYSTEM_PROMPT: &str = "You are an expert automotive sales analyst for car showrooms in \
Jordan. You understand the Jordanian automotive market: family-oriented purchasing decisions, \
the weight of trust and personal relationships with the consultant, price negotiation as an \
expected part of the sale, and the importance of financing options and Islamic-finance \
alternatives. Score each customer visit objectively and respond with a single JSON object only.";

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

const OUTPUT_SCHEMA: &str = r#"Respond with a JSON object with exactly these fields:
{
  "purchase_probability": number between 0 and 1,
  "sentiment_score": number between -1 and 1,
  "priority_ranking": integer between 1 and 10,
  "confidence_score": number between 0 and 1,
  "recommended_actions": array of 3 to 5 short strings,
  "concerns": array of strings,
  "opportunities": array of strings,
  "next_contact_timing": string,
  "reasoning": string,
  "cultural_considerations": string
}"#;

fn or_default<'a>(value: Option<&'a str>, missing: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => missing,
    }
}

fn language_label(language: Option<Language>) -> &'static str {
    match language {
        Some(Language::Ar) => "Arabic",
        Some(Language::En) => "English",
        None => NOT_PROVIDED,
    }
}

/// Builds the user prompt for a visit.
pub fn build_prompt(request: &VisitAnalysisRequest) -> String {
    let customer = request.customer_data.clone().unwrap_or_default();
    let visit = &request.visit_data;
    let interest = &visit.vehicle_interest;

    let previous_visits = customer
        .previous_visits
        .map(|n| n.to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());
    let features = if interest.features.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        interest.features.join(", ")
    };
    let duration = visit
        .visit_duration
        .map(|m| format!("{m} minutes"))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        "Analyze this car showroom visit and score the customer's purchase intent.\n\
         \n\
         CUSTOMER\n\
         - Name: {name}\n\
         - Phone: {phone}\n\
         - Preferred language: {language}\n\
         - Previous visits: {previous_visits}\n\
         \n\
         VEHICLE INTEREST\n\
         - Type: {vehicle_type}\n\
         - Brand: {brand}\n\
         - Model: {model}\n\
         - Budget range: {budget}\n\
         - Purchase timeline: {timeline}\n\
         - Desired features: {features}\n\
         - Financing preference: {financing}\n\
         \n\
         VISIT\n\
         - Consultant notes: {notes}\n\
         - Source: {source}\n\
         - Duration: {duration}\n\
         - Interaction quality: {quality}\n\
         \n\
         {OUTPUT_SCHEMA}",
        name = or_default(customer.name.as_deref(), NOT_PROVIDED),
        phone = or_default(customer.phone.as_deref(), NOT_PROVIDED),
        language = language_label(customer.language_preference),
        vehicle_type = or_default(interest.vehicle_type.as_deref(), NOT_SPECIFIED),
        brand = or_default(interest.brand.as_deref(), NOT_SPECIFIED),
        model = or_default(interest.model.as_deref(), NOT_SPECIFIED),
        budget = or_default(interest.budget_range.as_deref(), NOT_SPECIFIED),
        timeline = or_default(interest.purchase_timeline.as_deref(), NOT_SPECIFIED),
        financing = or_default(interest.financing_preference.as_deref(), NOT_SPECIFIED),
        notes = or_default(visit.consultant_notes.as_deref(), NOT_PROVIDED),
        source = or_default(visit.source.as_deref(), NOT_SPECIFIED),
        quality = or_default(visit.interaction_quality.as_deref(), NOT_SPECIFIED),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::{CustomerData, VehicleInterest, VisitData};

    fn full_request() -> VisitAnalysisRequest {
        VisitAnalysisRequest {
            visit_id: "visit-1".into(),
            customer_data: Some(CustomerData {
                name: Some("Omar".into()),
                phone: Some("+962790000000".into()),
                language_preference: Some(Language::Ar),
                previous_visits: Some(2),
            }),
            visit_data: VisitData {
                vehicle_interest: VehicleInterest {
                    vehicle_type: Some("SUV".into()),
                    brand: Some("Toyota".into()),
                    model: Some("RAV4".into()),
                    budget_range: Some("25000-35000".into()),
                    purchase_timeline: Some("within_month".into()),
                    features: vec!["sunroof".into(), "hybrid".into()],
                    financing_preference: Some("bank".into()),
                },
                consultant_notes: Some("Very interested in the hybrid".into()),
                source: Some("walk_in".into()),
                visit_duration: Some(45),
                interaction_quality: Some("excellent".into()),
            },
            force_reanalysis: false,
        }
    }

    #[test]
    fn renders_every_provided_field() {
        let prompt = build_prompt(&full_request());
        for needle in [
            "Omar",
            "+962790000000",
            "Arabic",
            "Previous visits: 2",
            "SUV",
            "Toyota",
            "RAV4",
            "25000-35000",
            "within_month",
            "sunroof, hybrid",
            "bank",
            "Very interested in the hybrid",
            "walk_in",
            "45 minutes",
            "excellent",
        ] {
            assert!(prompt.contains(needle), "prompt missing {needle:?}");
        }
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let request = VisitAnalysisRequest {
            visit_id: "visit-2".into(),
            ..Default::default()
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("- Name: Not provided"));
        assert!(prompt.contains("- Previous visits: Not provided"));
        assert!(prompt.contains("- Budget range: Not specified"));
        assert!(prompt.contains("- Desired features: Not specified"));
        assert!(prompt.contains("- Consultant notes: Not provided"));
        assert!(prompt.contains("- Duration: Not specified"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut request = full_request();
        request.visit_data.vehicle_interest.brand = Some("  ".into());
        assert!(build_prompt(&request).contains("- Brand: Not specified"));
    }

    #[test]
    fn embeds_output_schema_with_ranges() {
        let prompt = build_prompt(&full_request());
        assert!(prompt.contains("\"purchase_probability\": number between 0 and 1"));
        assert!(prompt.contains("\"sentiment_score\": number between -1 and 1"));
        assert!(prompt.contains("\"priority_ranking\": integer between 1 and 10"));
    }

    #[test]
    fn is_deterministic() {
        let request = full_request();
        assert_eq!(build_prompt(&request), build_prompt(&request.clone()));
    }

    #[test]
    fn force_flag_does_not_change_prompt() {
        let mut forced = full_request();
        forced.force_reanalysis = true;
        assert_eq!(build_prompt(&full_request()), build_prompt(&forced));
    }

    #[test]
    fn system_prompt_frames_jordanian_market() {
        assert!(SYSTEM_PROMPT.contains("Jordan"));
        assert!(SYSTEM_PROMPT.contains("JSON"));
    }
}
