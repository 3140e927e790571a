//! Built-in sample registry
//!
//! A small, realistic content set used when no content file is configured,
//! and by the test suite.

use super::definition::{
    AnatomyReference, CareGuidance, ContentSection, LevelExplanations, PromptDefinition,
    RelatedCondition, SectionKind,
};
use super::registry::{ContentRegistry, RegistryError};
use crate::types::PriorityTier;

const DISCLAIMER: &str =
    "This content is educational and does not replace advice from a qualified clinician.";

fn section(id: &str, kind: SectionKind, title: &str, body: &str) -> ContentSection {
    ContentSection {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn anatomy(structure_id: &str, label: &str, camera: &str) -> AnatomyReference {
    AnatomyReference {
        structure_id: structure_id.to_string(),
        label: label.to_string(),
        camera_hint: Some(camera.to_string()),
        highlight: vec![structure_id.to_string()],
    }
}

fn condition(name: &str, summary: &str) -> RelatedCondition {
    RelatedCondition {
        name: name.to_string(),
        summary: summary.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn levels(items: [&str; 5]) -> LevelExplanations {
    LevelExplanations::new(items.map(str::to_string))
}

fn headache() -> PromptDefinition {
    PromptDefinition {
        id: "learn-headache".to_string(),
        symptom: "headache".to_string(),
        aliases: strings(&["head pain", "migraine", "tension headache", "cephalalgia"]),
        title: "Understanding Your Headache".to_string(),
        teaser: "Most headaches are harmless. Learn what drives the pain and which signs need attention.".to_string(),
        sections: vec![
            section("anatomy", SectionKind::Anatomy, "Where head pain comes from",
                "The brain itself has no pain receptors. Pain comes from blood vessels, the meninges, muscles of the scalp and neck, and cranial nerves."),
            section("mechanism", SectionKind::Pathophysiology, "Why it hurts",
                "Tension-type pain follows sustained muscle contraction; migraine involves trigeminovascular activation and release of CGRP."),
            section("differential", SectionKind::Differential, "Common types",
                "Tension-type, migraine, cluster and medication-overuse headache account for most cases."),
            section("care", SectionKind::WhenToSeekCare, "When to get help",
                "A sudden worst-ever headache, fever with stiff neck, or new neurological symptoms need emergency care."),
            section("lifestyle", SectionKind::Lifestyle, "Everyday triggers",
                "Regular sleep, hydration and meals reduce how often headaches occur."),
        ],
        anatomy: vec![
            anatomy("meninges", "Meninges", "head-lateral"),
            anatomy("trigeminal-nerve", "Trigeminal nerve", "face-anterior"),
        ],
        related_symptoms: strings(&["dizziness", "nausea", "fatigue"]),
        related_conditions: vec![
            condition("Migraine", "Recurrent throbbing headache, often one-sided, with light sensitivity and nausea."),
            condition("Tension-type headache", "Band-like pressure linked to stress and muscle tension."),
        ],
        care: CareGuidance {
            urgent_signs: strings(&["Sudden thunderclap onset", "Fever with stiff neck", "Weakness, confusion or vision loss"]),
            routine_reasons: strings(&["Headaches more than twice a week", "Change in usual headache pattern"]),
            self_care: strings(&["Rest in a dark room", "Stay hydrated", "Limit pain relievers to avoid rebound"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::Medium,
        explanations: levels([
            "Sometimes the parts around your brain get squeezed or tired, and that makes your head hurt.",
            "Headaches usually come from tight muscles or irritated blood vessels and nerves around the brain, not the brain itself.",
            "Primary headaches arise from pain-sensitive extracranial and meningeal structures; assess red flags using SNOOP criteria.",
            "Migraine pathophysiology centres on trigeminovascular activation, CGRP release and cortical spreading depression.",
            "Differentiate primary from secondary headache; apply SNOOP4 red flags and consider CGRP-targeted prophylaxis for refractory migraine.",
        ]),
    }
}

fn chest_pain() -> PromptDefinition {
    PromptDefinition {
        id: "learn-chest-pain".to_string(),
        symptom: "chest pain".to_string(),
        aliases: strings(&["chest discomfort", "chest tightness", "angina", "chest pressure"]),
        title: "Understanding Chest Pain".to_string(),
        teaser: "Chest pain has many sources. Learn how heart, lung and muscle pain differ.".to_string(),
        sections: vec![
            section("anatomy", SectionKind::Anatomy, "Structures in the chest",
                "The heart, lungs, oesophagus, chest wall and nerves can all produce chest pain."),
            section("mechanism", SectionKind::Pathophysiology, "Referred pain",
                "Cardiac and oesophageal fibres share spinal segments with the arm and jaw, so ischemic pain is often felt there."),
            section("care", SectionKind::WhenToSeekCare, "Emergency warning signs",
                "Pressure spreading to the arm or jaw, shortness of breath or sweating require emergency services."),
        ],
        anatomy: vec![anatomy("heart", "Heart", "thorax-anterior")],
        related_symptoms: strings(&["shortness of breath", "palpitations"]),
        related_conditions: vec![
            condition("Angina", "Chest pressure from reduced blood flow to heart muscle, usually with exertion."),
            condition("GERD", "Acid reflux causing burning behind the breastbone."),
        ],
        care: CareGuidance {
            urgent_signs: strings(&["Pressure spreading to arm or jaw", "Shortness of breath", "Cold sweat or fainting"]),
            routine_reasons: strings(&["Pain reproduced by pressing on the chest wall"]),
            self_care: strings(&["Do not drive yourself if symptoms are severe"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::High,
        explanations: levels([
            "Your chest holds your heart and lungs. If one of them is hurting, you should tell a grown-up right away.",
            "Chest pain can come from the heart, lungs, stomach or muscles. Pressure that spreads to your arm or jaw is an emergency.",
            "Differentiate ischemic, pleuritic, oesophageal and musculoskeletal pain; obtain an ECG within 10 minutes for suspected ACS.",
            "Visceral afferents converge with somatic afferents at T1-T5, producing poorly localised, referred ischemic pain.",
            "Risk-stratify with HEART score and high-sensitivity troponin pathways; exclude dissection, PE and tension pneumothorax.",
        ]),
    }
}

fn abdominal_pain() -> PromptDefinition {
    PromptDefinition {
        id: "learn-abdominal-pain".to_string(),
        symptom: "abdominal pain".to_string(),
        aliases: strings(&["stomach ache", "belly pain", "tummy ache", "cramps"]),
        title: "Understanding Abdominal Pain".to_string(),
        teaser: "Where the pain sits in your belly says a lot about its cause.".to_string(),
        sections: vec![
            section("anatomy", SectionKind::Anatomy, "The four quadrants",
                "Organs in each quadrant produce pain in typical locations."),
            section("care", SectionKind::WhenToSeekCare, "When to get help",
                "Severe pain, a rigid belly, vomiting blood or black stools need urgent care."),
            section("prevention", SectionKind::Prevention, "Protecting your gut",
                "Fibre, fluids and limiting alcohol and NSAIDs reduce common causes."),
        ],
        anatomy: vec![anatomy("stomach", "Stomach", "abdomen-anterior")],
        related_symptoms: strings(&["nausea"]),
        related_conditions: vec![condition("Gastritis", "Inflamed stomach lining causing upper abdominal burning.")],
        care: CareGuidance {
            urgent_signs: strings(&["Rigid, board-like abdomen", "Vomiting blood", "Black or bloody stools"]),
            routine_reasons: strings(&["Pain lasting more than a week"]),
            self_care: strings(&["Small, bland meals", "Stay hydrated"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::Medium,
        explanations: levels([
            "Your tummy has lots of parts that help you eat. Sometimes one gets upset and it hurts.",
            "Belly pain can come from the stomach, intestines, gallbladder or other organs. Its location helps find the cause.",
            "Assess by quadrant, onset and peritoneal signs; monitor for guarding and rebound tenderness.",
            "Visceral pain is poorly localised midline pain; parietal peritoneal irritation produces sharp, localised pain.",
            "Apply a structured differential by quadrant; consider mesenteric ischemia when pain is out of proportion to exam.",
        ]),
    }
}

fn nausea() -> PromptDefinition {
    PromptDefinition {
        id: "learn-nausea".to_string(),
        symptom: "nausea".to_string(),
        aliases: strings(&["queasy", "feeling sick", "vomiting", "upset stomach"]),
        title: "Understanding Nausea".to_string(),
        teaser: "Nausea is your brain's alarm system. Learn what sets it off.".to_string(),
        sections: vec![
            section("mechanism", SectionKind::Pathophysiology, "The vomiting centre",
                "Signals from the gut, inner ear and bloodstream converge on the brainstem vomiting centre."),
            section("lifestyle", SectionKind::Lifestyle, "Settling your stomach",
                "Small sips of fluid and bland food help while nausea passes."),
        ],
        anatomy: vec![anatomy("brainstem", "Brainstem", "head-posterior")],
        related_symptoms: strings(&["abdominal pain", "dizziness"]),
        related_conditions: vec![condition("Gastroenteritis", "Infection of the gut causing nausea, vomiting and diarrhea.")],
        care: CareGuidance {
            urgent_signs: strings(&["Unable to keep fluids down for 24 hours", "Signs of dehydration"]),
            routine_reasons: strings(&["Nausea lasting more than a few days"]),
            self_care: strings(&["Sip clear fluids", "Ginger may help"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::Low,
        explanations: levels([
            "Nausea is when your tummy feels like it might throw up. Your body is trying to protect you.",
            "Nausea happens when your brain gets warning signals from your stomach, inner ear or blood.",
            "Identify triggers via chemoreceptor trigger zone, vestibular and vagal pathways; monitor hydration status.",
            "The area postrema senses circulating emetogens; vagal afferents relay gut distension via 5-HT3 receptors.",
            "Target antiemetic choice to mechanism: 5-HT3, D2, H1 or NK1 antagonism as indicated.",
        ]),
    }
}

fn fatigue() -> PromptDefinition {
    PromptDefinition {
        id: "learn-fatigue".to_string(),
        symptom: "fatigue".to_string(),
        aliases: strings(&["tiredness", "exhaustion", "low energy", "weakness"]),
        title: "Understanding Fatigue".to_string(),
        teaser: "Tiredness that sleep doesn't fix can have many causes worth understanding.".to_string(),
        sections: vec![
            section("differential", SectionKind::Differential, "Common causes",
                "Poor sleep, anemia, thyroid disease, depression and infections are frequent causes."),
            section("lifestyle", SectionKind::Lifestyle, "Energy habits",
                "Consistent sleep, activity and balanced meals support energy levels."),
        ],
        anatomy: vec![anatomy("thyroid", "Thyroid gland", "neck-anterior")],
        related_symptoms: strings(&["dizziness"]),
        related_conditions: vec![condition("Anemia", "Low red blood cells reducing oxygen delivery to tissues.")],
        care: CareGuidance {
            urgent_signs: strings(&["Fatigue with chest pain or fainting"]),
            routine_reasons: strings(&["Fatigue lasting more than two weeks"]),
            self_care: strings(&["Keep a regular sleep schedule"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::Low,
        explanations: levels([
            "Feeling tired all the time means your body needs more rest, food or help from a doctor.",
            "Ongoing tiredness can come from sleep problems, low iron, thyroid issues or stress.",
            "Screen for anemia, hypothyroidism, sleep disorders and depression; document functional impact.",
            "Fatigue reflects reduced oxygen delivery, altered metabolism or central neurotransmitter changes.",
            "Evaluate with CBC, TSH, metabolic panel and validated sleep and mood instruments before labelling idiopathic.",
        ]),
    }
}

fn dizziness() -> PromptDefinition {
    PromptDefinition {
        id: "learn-dizziness".to_string(),
        symptom: "dizziness".to_string(),
        aliases: strings(&["lightheaded", "vertigo", "woozy", "spinning"]),
        title: "Understanding Dizziness".to_string(),
        teaser: "Spinning and lightheadedness are different problems. Learn which you have.".to_string(),
        sections: vec![
            section("anatomy", SectionKind::Anatomy, "Your balance system",
                "The inner ear, eyes and brain work together to keep you balanced."),
            section("care", SectionKind::WhenToSeekCare, "When to get help",
                "Dizziness with slurred speech, weakness or a severe headache needs emergency care."),
        ],
        anatomy: vec![anatomy("inner-ear", "Inner ear", "head-lateral")],
        related_symptoms: strings(&["nausea", "headache"]),
        related_conditions: vec![condition("BPPV", "Brief spinning triggered by head movement, caused by displaced ear crystals.")],
        care: CareGuidance {
            urgent_signs: strings(&["Slurred speech or facial droop", "Fainting"]),
            routine_reasons: strings(&["Recurrent spinning episodes"]),
            self_care: strings(&["Sit or lie down when dizzy", "Rise slowly"]),
            disclaimer: DISCLAIMER.to_string(),
        },
        priority: PriorityTier::Medium,
        explanations: levels([
            "Your ears help you stay balanced. When they get mixed up, the world feels like it's spinning.",
            "Dizziness can mean spinning (often the inner ear) or feeling faint (often blood pressure).",
            "Distinguish vertigo, presyncope and disequilibrium; check orthostatic vitals.",
            "Peripheral vertigo arises from vestibular end-organ asymmetry; central causes involve brainstem or cerebellum.",
            "Apply HINTS examination in acute vestibular syndrome to separate peripheral from central causes.",
        ]),
    }
}

/// The sample definitions in registry insertion order
pub fn definitions() -> Vec<PromptDefinition> {
    vec![headache(), chest_pain(), abdominal_pain(), nausea(), fatigue(), dizziness()]
}

/// The sample registry
pub fn registry() -> Result<ContentRegistry, RegistryError> {
    ContentRegistry::new(definitions())
}
