use crate::assessments::domain::{RiasecCategory, RiasecQuestion};
use serde::Serialize;

const fn question(id: u16, category: RiasecCategory, text: &'static str) -> RiasecQuestion {
    RiasecQuestion { id, text, category }
}

/// Forty-eight yes/no activity prompts, eight per category, grouped R through C.
pub static RIASEC_QUESTIONS: [RiasecQuestion; 48] = [
    question(1, RiasecCategory::R, "Inspect the quality of parts before shipment"),
    question(2, RiasecCategory::R, "Lay brick or tile"),
    question(3, RiasecCategory::R, "Work on an offshore oil-drilling rig"),
    question(4, RiasecCategory::R, "Assemble electronic components"),
    question(5, RiasecCategory::R, "Operate a grinding machine in a factory"),
    question(6, RiasecCategory::R, "Fix a broken faucet"),
    question(7, RiasecCategory::R, "Assemble products in a factory"),
    question(8, RiasecCategory::R, "Install flooring in houses"),
    question(9, RiasecCategory::I, "Study the structure of the human body"),
    question(10, RiasecCategory::I, "Study animal behavior"),
    question(11, RiasecCategory::I, "Do research on plants or animals"),
    question(12, RiasecCategory::I, "Develop a new medical treatment or procedure"),
    question(13, RiasecCategory::I, "Conduct biological research"),
    question(14, RiasecCategory::I, "Study whales and other types of marine life"),
    question(15, RiasecCategory::I, "Work in a biology lab"),
    question(16, RiasecCategory::I, "Make a map of the bottom of an ocean"),
    question(17, RiasecCategory::A, "Conduct a musical choir"),
    question(18, RiasecCategory::A, "Direct a play"),
    question(19, RiasecCategory::A, "Design artwork for magazines"),
    question(20, RiasecCategory::A, "Write a song"),
    question(21, RiasecCategory::A, "Write books or plays"),
    question(22, RiasecCategory::A, "Play a musical instrument"),
    question(23, RiasecCategory::A, "Perform stunts for a movie or television show"),
    question(24, RiasecCategory::A, "Design sets for plays"),
    question(25, RiasecCategory::S, "Give career guidance to people"),
    question(26, RiasecCategory::S, "Do volunteer work at a non-profit organization"),
    question(27, RiasecCategory::S, "Help people who have problems with drugs or alcohol"),
    question(28, RiasecCategory::S, "Teach an individual an exercise routine"),
    question(29, RiasecCategory::S, "Help people with family-related problems"),
    question(30, RiasecCategory::S, "Supervise the activities of children at a camp"),
    question(31, RiasecCategory::S, "Teach children how to read"),
    question(32, RiasecCategory::S, "Help elderly people with their daily activities"),
    question(33, RiasecCategory::E, "Sell restaurant franchises to individuals"),
    question(34, RiasecCategory::E, "Sell merchandise at a department store"),
    question(35, RiasecCategory::E, "Manage the operations of a hotel"),
    question(36, RiasecCategory::E, "Operate a beauty salon or barber shop"),
    question(37, RiasecCategory::E, "Manage a department within a large company"),
    question(38, RiasecCategory::E, "Manage a clothing store"),
    question(39, RiasecCategory::E, "Sell houses"),
    question(40, RiasecCategory::E, "Run a toy store"),
    question(41, RiasecCategory::C, "Generate the monthly payroll checks for an office"),
    question(42, RiasecCategory::C, "Inventory supplies using a hand-held computer"),
    question(43, RiasecCategory::C, "Use a computer program to generate customer bills"),
    question(44, RiasecCategory::C, "Maintain employee records"),
    question(45, RiasecCategory::C, "Compute and record statistical and other numerical data"),
    question(46, RiasecCategory::C, "Operate a calculator"),
    question(47, RiasecCategory::C, "Handle customers' bank transactions"),
    question(48, RiasecCategory::C, "Keep shipping and receiving records"),
];

/// Static descriptive text for one Holland category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: RiasecCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub careers: [&'static str; 6],
}

static CATEGORY_INFO: [CategoryInfo; 6] = [
    CategoryInfo {
        category: RiasecCategory::R,
        name: "Realistic",
        description: "Enjoys working with objects, machines and tools",
        careers: [
            "Mechanical Engineer",
            "Electrician",
            "Architect",
            "Pilot",
            "Agricultural Specialist",
            "Construction Manager",
        ],
    },
    CategoryInfo {
        category: RiasecCategory::I,
        name: "Investigative",
        description: "Enjoys analyzing, researching and solving problems",
        careers: [
            "Scientist",
            "Physician",
            "Programmer",
            "Researcher",
            "Pharmacist",
            "Software Engineer",
        ],
    },
    CategoryInfo {
        category: RiasecCategory::A,
        name: "Artistic",
        description: "Enjoys creating, designing and performing",
        careers: [
            "Painter",
            "Musician",
            "Designer",
            "Film Director",
            "Writer",
            "Photographer",
        ],
    },
    CategoryInfo {
        category: RiasecCategory::S,
        name: "Social",
        description: "Enjoys helping, teaching and supporting others",
        careers: [
            "Teacher",
            "Nurse",
            "Social Worker",
            "Counselor",
            "HR Specialist",
            "Psychologist",
        ],
    },
    CategoryInfo {
        category: RiasecCategory::E,
        name: "Enterprising",
        description: "Enjoys persuading, leading and selling",
        careers: [
            "Entrepreneur",
            "Manager",
            "Lawyer",
            "Marketing Specialist",
            "Sales Representative",
            "Politician",
        ],
    },
    CategoryInfo {
        category: RiasecCategory::C,
        name: "Conventional",
        description: "Enjoys organizing, managing data and following procedures",
        careers: [
            "Accountant",
            "Secretary",
            "Banker",
            "Administrator",
            "Auditor",
            "Data Analyst",
        ],
    },
];

pub fn category_info(category: RiasecCategory) -> &'static CategoryInfo {
    // Table order matches the enum declaration order.
    &CATEGORY_INFO[category as usize]
}

/// Narrative attached to a three-letter Holland code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HollandProfile {
    pub title: String,
    pub description: String,
    pub careers: Vec<String>,
    pub strengths: Vec<String>,
    pub work_environment: String,
    /// True when no authored entry exists and the text was assembled from category info.
    pub synthesized: bool,
}

struct AuthoredProfile {
    code: &'static str,
    title: &'static str,
    description: &'static str,
    careers: &'static [&'static str],
    strengths: &'static [&'static str],
    work_environment: &'static str,
}

static AUTHORED_PROFILES: &[AuthoredProfile] = &[
    AuthoredProfile {
        code: "RIA",
        title: "Creative Engineer",
        description: "You like combining hands-on work with research and creativity.",
        careers: &["Design Engineer", "Architect", "Inventor", "Software Engineer"],
        strengths: &["Logical thinking", "Creativity", "Practical skills"],
        work_environment: "A mix of laboratory and workshop settings",
    },
    AuthoredProfile {
        code: "RIS",
        title: "Medical Technician",
        description: "You like technical work that also helps other people.",
        careers: &["Medical Technician", "Physical Therapist", "Dental Technician"],
        strengths: &["Dexterity", "Care for others", "Attention to detail"],
        work_environment: "Hospitals and clinics",
    },
    AuthoredProfile {
        code: "RIE",
        title: "Engineering Manager",
        description: "You like technical work with room for leadership and business.",
        careers: &["Engineering Manager", "Production Director", "Tech Entrepreneur"],
        strengths: &["Technical skills", "Leadership", "Decisiveness"],
        work_environment: "Factories and technology companies",
    },
    AuthoredProfile {
        code: "RIC",
        title: "Technical Analyst",
        description: "You like technical work with data and clear procedures.",
        careers: &["Quality Control Specialist", "Lab Technician", "Technical Analyst"],
        strengths: &["Carefulness", "Precision", "Following procedures"],
        work_environment: "Laboratories and factories",
    },
    AuthoredProfile {
        code: "IAS",
        title: "Social Scientist",
        description: "You like research with a creative side and a focus on supporting others.",
        careers: &["Psychologist", "Sociologist", "Behavioral Researcher"],
        strengths: &["Analysis", "Empathy", "Creativity"],
        work_environment: "Universities, research institutes and hospitals",
    },
    AuthoredProfile {
        code: "IAE",
        title: "Creative Entrepreneur",
        description: "You like combining research with creativity and business.",
        careers: &["Startup Founder", "Creative Director", "Product Developer"],
        strengths: &["Innovation", "Business thinking", "Creativity"],
        work_environment: "Startups and creative agencies",
    },
    AuthoredProfile {
        code: "ASE",
        title: "Creative Communicator",
        description: "You like creative work together with people and business.",
        careers: &["Marketing Director", "Event Manager", "PR Manager", "Content Creator"],
        strengths: &["Creativity", "Communication", "Persuasion"],
        work_environment: "Agencies and media companies",
    },
    AuthoredProfile {
        code: "SEC",
        title: "Human Resources Manager",
        description: "You like working with people and managing through clear processes.",
        careers: &["HR Manager", "Training Manager", "Administrative Manager"],
        strengths: &["People skills", "Organization", "Following procedures"],
        work_environment: "Offices and businesses",
    },
    AuthoredProfile {
        code: "ECS",
        title: "Business Manager",
        description: "You like business with clear processes and working with people.",
        careers: &["Sales Manager", "Branch Manager", "Store Manager"],
        strengths: &["Leadership", "Organization", "Sales skills"],
        work_environment: "Stores, branches and sales offices",
    },
    AuthoredProfile {
        code: "CES",
        title: "Office Administrator",
        description: "You like organizing work, running a business and supporting others.",
        careers: &["Office Manager", "Executive Assistant", "Operations Manager"],
        strengths: &["Organization", "Communication", "Management"],
        work_environment: "Corporate offices",
    },
    AuthoredProfile {
        code: "SAE",
        title: "Education and Training",
        description: "You like teaching and supporting learners with creative methods.",
        careers: &["Teacher", "Trainer", "Coach", "University Lecturer"],
        strengths: &["Explaining ideas", "Creativity", "Patience"],
        work_environment: "Schools and training centers",
    },
    AuthoredProfile {
        code: "AIR",
        title: "Technical Designer",
        description: "You like creative work combined with research and practice.",
        careers: &["Industrial Designer", "UX Designer", "Product Designer"],
        strengths: &["Creativity", "Analysis", "Practical skills"],
        work_environment: "Design studios and technology companies",
    },
    AuthoredProfile {
        code: "SIA",
        title: "Creative Counselor",
        description: "You like helping others through research and creativity.",
        careers: &["Art Therapist", "Career Counselor", "Music Therapist"],
        strengths: &["Empathy", "Creativity", "Analysis"],
        work_environment: "Hospitals and counseling centers",
    },
    AuthoredProfile {
        code: "EAS",
        title: "Creative Leader",
        description: "You like leading teams on creative projects.",
        careers: &["Creative Director", "Producer", "Art Director"],
        strengths: &["Leadership", "Creativity", "Communication"],
        work_environment: "Agencies, studios and media companies",
    },
    AuthoredProfile {
        code: "ICR",
        title: "Technical Researcher",
        description: "You like research with data and hands-on work.",
        careers: &["Data Scientist", "Research Engineer", "Technical Analyst"],
        strengths: &["Analysis", "Logic", "Technical skills"],
        work_environment: "Laboratories and technology companies",
    },
];

const FALLBACK_ENVIRONMENT: &str = "A flexible environment that suits a broad mix of interests";
const FALLBACK_CAREER_LIMIT: usize = 6;

/// Looks up the authored narrative for `code`, or assembles one from the categories it names.
pub fn holland_profile(code: &[RiasecCategory]) -> HollandProfile {
    let letters: String = code.iter().map(|category| category.letter()).collect();
    if let Some(authored) = AUTHORED_PROFILES.iter().find(|entry| entry.code == letters) {
        return HollandProfile {
            title: authored.title.to_string(),
            description: authored.description.to_string(),
            careers: authored.careers.iter().map(|c| c.to_string()).collect(),
            strengths: authored.strengths.iter().map(|s| s.to_string()).collect(),
            work_environment: authored.work_environment.to_string(),
            synthesized: false,
        };
    }

    let infos: Vec<&CategoryInfo> = code.iter().map(|category| category_info(*category)).collect();

    let mut careers: Vec<String> = Vec::new();
    for info in &infos {
        for career in info.careers.iter().take(2) {
            if !careers.iter().any(|existing| existing == career) {
                careers.push(career.to_string());
            }
        }
    }
    careers.truncate(FALLBACK_CAREER_LIMIT);

    let descriptions: Vec<String> = infos
        .iter()
        .map(|info| info.description.to_lowercase())
        .collect();

    HollandProfile {
        title: infos
            .iter()
            .map(|info| info.name)
            .collect::<Vec<_>>()
            .join(" - "),
        description: format!("You tend to combine: {}.", descriptions.join(", ")),
        careers,
        strengths: infos.iter().map(|info| info.name.to_string()).collect(),
        work_environment: FALLBACK_ENVIRONMENT.to_string(),
        synthesized: true,
    }
}
