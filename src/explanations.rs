//! Human-readable descriptions for each MBTI type.

use crate::mbti::MbtiType;
use std::borrow::Cow;
use std::collections::HashMap;

const DEFAULT_EXPLANATIONS: [(&str, &str); 16] = [
    ("ISTJ", "You are practical, fact-minded, and reliable. You prefer structure and order, and you approach tasks systematically with attention to detail."),
    ("ISFJ", "You are warm-hearted, conscientious, and cooperative. You want harmony in your environment and work with determination to establish it."),
    ("INFJ", "You seek meaning and connection in ideas, relationships, and material possessions. You want to understand what motivates people and are insightful about others."),
    ("INTJ", "You have original minds and great drive for implementing your ideas and achieving your goals. You quickly see patterns in external events and develop long-range explanatory perspectives."),
    ("ISTP", "You are tolerant and flexible, quiet observers until a problem appears, then act quickly to find workable solutions. You analyze what makes things work and readily get through large amounts of data to isolate the core of practical problems."),
    ("ISFP", "You are quiet, friendly, sensitive, and kind. You enjoy the present moment and what's going on around you. You like to have your own space and to work within your own time frame."),
    ("INFP", "You are idealistic, loyal to your values and to people who are important to you. You want an external life that is congruent with your values. You are curious, quick to see possibilities, and can be catalysts for implementing ideas."),
    ("INTP", "You seek to develop logical explanations for everything that interests you. You are theoretical and abstract, interested more in ideas than in social interaction. You are quiet, contained, flexible, and adaptable."),
    ("ESTP", "You are flexible and tolerant, taking a pragmatic approach focused on immediate results. You are bored by theories and conceptual explanations; you want to act energetically to solve the problem."),
    ("ESFP", "You are outgoing, friendly, and accepting. You are exuberant lovers of life, people, and material comforts. You enjoy working with others to make things happen."),
    ("ENFP", "You are warmly enthusiastic and imaginative. You see life as full of possibilities. You make connections between events and information very quickly, and confidently proceed based on the patterns you see."),
    ("ENTP", "You are quick, ingenious, stimulating, alert, and outspoken. You are resourceful in solving new and challenging problems. You are adept at generating conceptual possibilities and then analyzing them strategically."),
    ("ESTJ", "You are practical, realistic, matter-of-fact. You are decisive, quickly move to implement decisions. You organize projects and people to get things done, focus on getting results in the most efficient way possible."),
    ("ESFJ", "You are warmhearted, conscientious, and cooperative. You want harmony in your environment and work with determination to establish it. You like to work with others to complete tasks accurately and on time."),
    ("ENFJ", "You are warm, empathetic, responsive, and responsible. You are highly attuned to the emotions, needs, and motivations of others. You find potential in everyone and want to help others fulfill their potential."),
    ("ENTJ", "You are frank, decisive, assume leadership readily. You quickly see illogical and inefficient procedures and policies, develop and implement comprehensive systems to solve organizational problems."),
];

/// Lookup table from type to description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationTable {
    entries: HashMap<MbtiType, String>,
}

impl ExplanationTable {
    /// Table with an entry for each of the 16 types.
    pub fn standard() -> Self {
        let entries = DEFAULT_EXPLANATIONS
            .iter()
            .filter_map(|(code, text)| code.parse::<MbtiType>().ok().map(|t| (t, text.to_string())))
            .collect();
        ExplanationTable { entries }
    }

    /// Table with custom entries; missing types get the generic text.
    pub fn from_entries(entries: impl IntoIterator<Item = (MbtiType, String)>) -> Self {
        ExplanationTable {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, mbti: MbtiType) -> Option<&str> {
        self.entries.get(&mbti).map(String::as_str)
    }

    /// Description for `mbti`, or a generic sentence naming the type.
    pub fn describe(&self, mbti: MbtiType) -> Cow<'_, str> {
        match self.get(mbti) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(generic_explanation(mbti)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExplanationTable {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn generic_explanation(mbti: MbtiType) -> String {
    format!(
        "Based on your responses, you have been classified as {} personality type.",
        mbti
    )
}
