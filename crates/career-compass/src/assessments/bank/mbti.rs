use crate::assessments::domain::{MbtiPole, MbtiQuestion};

macro_rules! q {
    ($id:expr, $pole:ident, $text:expr) => {
        MbtiQuestion {
            id: $id,
            text: $text,
            dimension: MbtiPole::$pole,
        }
    };
}

/// Sixty statements cycling through E/I, S/N, T/F, J/P; poles alternate within each pair.
pub static MBTI_QUESTIONS: [MbtiQuestion; 60] = [
    q!(1, E, "I feel energized after spending time with a large group of people."),
    q!(2, S, "I focus on facts and details rather than the big picture."),
    q!(3, T, "I make decisions based on logic rather than feelings."),
    q!(4, J, "I like to plan my activities well in advance."),
    q!(5, I, "I need quiet time alone to recharge after socializing."),
    q!(6, N, "I enjoy imagining possibilities for the future."),
    q!(7, F, "I consider how others will feel before I decide."),
    q!(8, P, "I prefer to keep my options open."),
    q!(9, E, "I enjoy being the center of attention at social events."),
    q!(10, S, "I trust practical experience more than theories."),
    q!(11, T, "I value fairness and consistency over keeping the peace."),
    q!(12, J, "I feel more comfortable once things are decided."),
    q!(13, I, "I prefer deep conversations with a few close friends."),
    q!(14, N, "I am drawn to abstract ideas and theories."),
    q!(15, F, "I value harmony in my relationships above winning an argument."),
    q!(16, P, "I work best under the pressure of a deadline."),
    q!(17, E, "I prefer to think out loud when working through a problem."),
    q!(18, S, "I prefer step-by-step instructions when learning something new."),
    q!(19, T, "I find it easy to give critical feedback."),
    q!(20, J, "I finish my work before I relax."),
    q!(21, I, "I think carefully before I speak."),
    q!(22, N, "I often look for hidden meanings and patterns."),
    q!(23, F, "I am easily moved by other people's stories."),
    q!(24, P, "I enjoy being spontaneous."),
    q!(25, E, "I find it easy to start conversations with strangers."),
    q!(26, S, "I notice small details that other people often miss."),
    q!(27, T, "I weigh the pros and cons carefully before choosing."),
    q!(28, J, "I keep my belongings and workspace well organized."),
    q!(29, I, "I prefer to complete tasks independently."),
    q!(30, N, "I get bored with routine and repetitive work."),
    q!(31, F, "I make choices based on my personal values."),
    q!(32, P, "I adapt easily when plans change suddenly."),
    q!(33, E, "I would rather work in a team than on my own."),
    q!(34, S, "I prefer dealing with what is concrete and real."),
    q!(35, T, "Being truthful matters more to me than being tactful."),
    q!(36, J, "I prefer to follow a schedule."),
    q!(37, I, "I feel drained after long periods of social interaction."),
    q!(38, N, "I trust my hunches even without hard evidence."),
    q!(39, F, "I would rather encourage people than criticize them."),
    q!(40, P, "I often start new projects before finishing old ones."),
    q!(41, E, "I would rather go to a party than spend the evening reading."),
    q!(42, S, "I like tasks that produce clear, practical results."),
    q!(43, T, "I enjoy debates that test ideas rigorously."),
    q!(44, J, "I make to-do lists and stick to them."),
    q!(45, I, "I keep my ideas to myself until they are fully formed."),
    q!(46, N, "I like inventing new ways of doing familiar things."),
    q!(47, F, "I find it hard to say no when someone needs help."),
    q!(48, P, "I prefer flexible guidelines over strict rules."),
    q!(49, E, "I share my thoughts and feelings openly with others."),
    q!(50, S, "I rely on proven methods rather than experimenting."),
    q!(51, T, "I judge an argument by its reasoning, not by who makes it."),
    q!(52, J, "I dislike last-minute changes to plans."),
    q!(53, I, "I enjoy spending a free evening on my own."),
    q!(54, N, "I think more about what could be than about what is."),
    q!(55, F, "I pay more attention to people's motives than to the facts of a situation."),
    q!(56, P, "I like to explore alternatives before committing."),
    q!(57, E, "I actively look for new social activities to join."),
    q!(58, S, "I remember specific facts better than general impressions."),
    q!(59, T, "I stay objective even when a decision affects people I care about."),
    q!(60, J, "I set deadlines for myself and meet them."),
];

static TYPE_TITLES: [(&str, &str); 16] = [
    ("ISTJ", "The Inspector"),
    ("ISFJ", "The Protector"),
    ("INFJ", "The Counselor"),
    ("INTJ", "The Mastermind"),
    ("ISTP", "The Craftsman"),
    ("ISFP", "The Composer"),
    ("INFP", "The Healer"),
    ("INTP", "The Architect"),
    ("ESTP", "The Dynamo"),
    ("ESFP", "The Performer"),
    ("ENFP", "The Champion"),
    ("ENTP", "The Visionary"),
    ("ESTJ", "The Supervisor"),
    ("ESFJ", "The Provider"),
    ("ENFJ", "The Teacher"),
    ("ENTJ", "The Commander"),
];

pub fn type_title(code: &str) -> Option<&'static str> {
    TYPE_TITLES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, title)| *title)
}
