use crate::assessments::domain::{GritComponent, GritQuestion};

const fn passion(id: u16, text: &'static str) -> GritQuestion {
    GritQuestion {
        id,
        text,
        component: GritComponent::Passion,
        reverse: true,
    }
}

const fn perseverance(id: u16, text: &'static str) -> GritQuestion {
    GritQuestion {
        id,
        text,
        component: GritComponent::Perseverance,
        reverse: false,
    }
}

/// Twelve-item grit scale. Consistency-of-interest items are reverse scored.
pub static GRIT_QUESTIONS: [GritQuestion; 12] = [
    perseverance(1, "I have overcome setbacks to conquer an important challenge."),
    passion(2, "New ideas and projects sometimes distract me from previous ones."),
    passion(3, "My interests change from year to year."),
    perseverance(4, "Setbacks don't discourage me."),
    passion(
        5,
        "I have been obsessed with a certain idea or project for a short time but later lost interest.",
    ),
    perseverance(6, "I am a hard worker."),
    passion(7, "I often set a goal but later choose to pursue a different one."),
    passion(
        8,
        "I have difficulty maintaining my focus on projects that take more than a few months to complete.",
    ),
    perseverance(9, "I finish whatever I begin."),
    perseverance(10, "I have achieved a goal that took years of work."),
    passion(11, "I become interested in new pursuits every few months."),
    perseverance(12, "I am diligent."),
];
