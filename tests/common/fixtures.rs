use juris::model::{Answer, Citation, EnforcementGapClaim, Response};

pub const SUMMARY_ES: &str =
    "La Ley 27.401 establece que las empresas deben implementar programas de integridad.";
pub const REASONING_ES: &str = "En primer lugar, la ley exige programas de integridad. \
                                Por lo tanto, las empresas deben capacitar al personal.";
pub const SNIPPET_ES: &str =
    "Las personas jurídicas deberán adoptar un Programa de Integridad para las empresas.";

pub const COMPLIANCE_QUERY: &str = "¿Qué exige el compliance corporativo en Argentina?";

/// Well-formed statute citation for Ley 27.401.
pub fn integrity_law_citation() -> Citation {
    Citation::new(
        "statute",
        "Law 27.401 - Corporate Criminal Liability",
        "AR",
        "AR_L27401",
    )
    .with_section("Art. 9")
    .with_year(2017)
}

pub struct ResponseBuilder {
    summary: String,
    reasoning: String,
    citations: Vec<Citation>,
    gap: Option<EnforcementGapClaim>,
    query_id: Option<String>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            summary: SUMMARY_ES.to_string(),
            reasoning: REASONING_ES.to_string(),
            citations: vec![integrity_law_citation().with_snippet(SNIPPET_ES)],
            gap: Some(EnforcementGapClaim::new(65.0, ["lack_enforcement"])),
            query_id: None,
        }
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn reasoning(mut self, reasoning: &str) -> Self {
        self.reasoning = reasoning.to_string();
        self
    }

    pub fn citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn gap(mut self, gap: Option<EnforcementGapClaim>) -> Self {
        self.gap = gap;
        self
    }

    pub fn query_id(mut self, id: &str) -> Self {
        self.query_id = Some(id.to_string());
        self
    }

    pub fn build(self) -> Response {
        let mut response = Response::new(Answer::new(self.summary, self.reasoning), self.citations);
        response.enforcement_gap = self.gap;
        response.query_id = self.query_id;
        response
    }
}

/// A full response document as an upstream generator would emit it.
pub const RESPONSE_JSON: &str = r#"{
    "answer": {
        "summary": "Law 27.401 requires that companies adopt integrity programs.",
        "reasoning": "First of all, the statute makes companies liable for corruption offences. Therefore, companies must adopt integrity programs to mitigate sanctions.",
        "risk_flags": ["enforcement_gap"],
        "confidence": 0.8
    },
    "citations": [
        {
            "type": "statute",
            "title": "Law 27.401 - Corporate Criminal Liability",
            "jurisdiction": "AR",
            "section": "Art. 23",
            "year": 2017,
            "snippet": "Companies must adopt integrity programs consisting of actions and procedures.",
            "locator": "AR_L27401",
            "confidence": 0.9
        }
    ],
    "enforcement_gap": {
        "formal_requirement": "Integrity programs required",
        "documented_reality": "31% full implementation",
        "gap_percentage": 65.0,
        "gap_mechanisms": ["lack_enforcement"],
        "confidence_level": "high"
    },
    "query_id": "q-001"
}"#;
