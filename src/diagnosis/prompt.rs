//! Prompt construction for the diagnosis chain. Both prompts request
//! French responses with a fixed line shape so the assembled report
//! stays scannable.

/// Instruction for the first call: a diagnosis in exactly two lines.
const DIAGNOSIS_INSTRUCTION: &str = "\
Voici le rapport médical d'un patient. À partir de ses signes vitaux, réponds en français sur exactement deux lignes :
Diagnostic : <le diagnostic le plus probable>
Examens complémentaires / données supplémentaires requis : <ce qui manque pour confirmer>";

/// Instruction for the second call: recommendations in three tiers.
const RECOMMENDATION_INSTRUCTION: &str = "\
Voici le rapport médical d'un patient et le diagnostic retenu. Propose en français des recommandations sur exactement trois lignes :
Court terme : <mesures immédiates>
Moyen terme : <suivi dans les semaines à venir>
Long terme : <prévention et hygiène de vie>";

/// First prompt: instruction plus the plain-text report.
pub fn build_diagnosis_prompt(report: &str) -> String {
    format!("{DIAGNOSIS_INSTRUCTION}\n\n<RAPPORT>\n{report}\n</RAPPORT>")
}

/// Second prompt: instruction plus the report and the diagnosis it
/// produced, so the recommendations are conditioned on both.
pub fn build_recommendation_prompt(report: &str, diagnosis: &str) -> String {
    format!(
        "{RECOMMENDATION_INSTRUCTION}\n\n<RAPPORT>\n{report}\n</RAPPORT>\n\n<DIAGNOSTIC>\n{diagnosis}\n</DIAGNOSTIC>"
    )
}
