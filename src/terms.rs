// src/terms.rs
//! Built-in term tables for contextual bias matching.
//!
//! Neutral-context phrases describe ordinary, non-pejorative mentions
//! ("yoruba culture"); biased-context phrases are loaded constructions
//! ("yoruba domination"). Slurs are flagged without context.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasCategory {
    Political,
    Ethnic,
    Religious,
    Regional,
}

impl BiasCategory {
    pub const ALL: [BiasCategory; 4] = [
        BiasCategory::Political,
        BiasCategory::Ethnic,
        BiasCategory::Religious,
        BiasCategory::Regional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Political => "political",
            Self::Ethnic => "ethnic",
            Self::Religious => "religious",
            Self::Regional => "regional",
        }
    }
}

fn default_requires_context() -> bool {
    true
}

/// One lexical entry. Phrases are matched lowercase and verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermPattern {
    pub term: String,
    pub category: BiasCategory,
    #[serde(default)]
    pub neutral_contexts: Vec<String>,
    #[serde(default)]
    pub biased_contexts: Vec<String>,
    /// `false` for slurs: biased regardless of surrounding words.
    #[serde(default = "default_requires_context")]
    pub requires_context: bool,
}

impl TermPattern {
    pub fn new(term: &str, category: BiasCategory, neutral: &[&str], biased: &[&str]) -> Self {
        Self {
            term: term.to_lowercase(),
            category,
            neutral_contexts: neutral.iter().map(|s| s.to_lowercase()).collect(),
            biased_contexts: biased.iter().map(|s| s.to_lowercase()).collect(),
            requires_context: true,
        }
    }

    pub fn slur(term: &str, category: BiasCategory) -> Self {
        Self {
            requires_context: false,
            ..Self::new(term, category, &[], &[])
        }
    }

    /// Lowercases all fields; used for entries coming from config files.
    pub fn normalized(mut self) -> Self {
        self.term = self.term.trim().to_lowercase();
        for p in self
            .neutral_contexts
            .iter_mut()
            .chain(self.biased_contexts.iter_mut())
        {
            *p = p.trim().to_lowercase();
        }
        self.neutral_contexts.retain(|p| !p.is_empty());
        self.biased_contexts.retain(|p| !p.is_empty());
        self
    }
}

/// All built-in entries, in category order.
pub fn builtin_terms() -> Vec<TermPattern> {
    let mut out = Vec::new();
    for cat in BiasCategory::ALL {
        out.extend(builtin_for(cat));
    }
    out
}

pub fn builtin_for(category: BiasCategory) -> Vec<TermPattern> {
    match category {
        BiasCategory::Political => political(),
        BiasCategory::Ethnic => ethnic(),
        BiasCategory::Religious => religious(),
        BiasCategory::Regional => regional(),
    }
}

fn political() -> Vec<TermPattern> {
    use BiasCategory::Political as P;
    vec![
        TermPattern::new(
            "apc",
            P,
            &["apc primaries", "apc candidate", "apc chairman", "apc convention", "apc government", "apc spokesperson", "apc manifesto"],
            &["apc thieves", "apc is evil", "apc must go", "useless apc", "corrupt apc", "apc looters"],
        ),
        TermPattern::new(
            "pdp",
            P,
            &["pdp primaries", "pdp candidate", "pdp chairman", "pdp convention", "pdp spokesperson", "pdp manifesto"],
            &["pdp thieves", "pdp is evil", "pdp must go", "useless pdp", "corrupt pdp", "pdp looters"],
        ),
        TermPattern::new(
            "labour party",
            P,
            &["labour party candidate", "labour party convention", "labour party manifesto", "labour party chairman"],
            &["labour party zombies", "labour party is a cult"],
        ),
        TermPattern::new("nnpp", P, &["nnpp candidate", "nnpp chairman"], &[]),
        TermPattern::new("apga", P, &["apga candidate", "apga chairman"], &[]),
        TermPattern::new(
            "buhari",
            P,
            &["president buhari", "buhari administration", "buhari government", "buhari said", "muhammadu buhari"],
            &["buhari must go", "useless buhari", "buhari is evil"],
        ),
        TermPattern::new(
            "tinubu",
            P,
            &["president tinubu", "tinubu administration", "tinubu government", "tinubu said", "bola tinubu"],
            &["tinubu is a thief", "drug baron tinubu", "useless tinubu"],
        ),
        TermPattern::new(
            "atiku",
            P,
            &["atiku abubakar", "atiku campaign", "atiku said"],
            &["atiku the thief", "corrupt atiku"],
        ),
        TermPattern::new(
            "obi",
            P,
            &["peter obi", "obi campaign", "obi said"],
            &["obi is a fraud", "obi zombies"],
        ),
        TermPattern::new("cabals", P, &[], &["cabals in aso rock", "evil cabals"]),
        TermPattern::slur("fulani agenda", P),
        TermPattern::slur("igbo agenda", P),
        TermPattern::slur("yoruba agenda", P),
    ]
}

fn ethnic() -> Vec<TermPattern> {
    use BiasCategory::Ethnic as E;
    vec![
        TermPattern::new(
            "yoruba",
            E,
            &["yoruba culture", "yoruba language", "yoruba people", "yoruba music", "yoruba film", "yoruba festival", "yoruba traditional", "yoruba heritage", "speaks yoruba", "in yoruba"],
            &["yoruba domination", "greedy yoruba", "yoruba are greedy", "yoruba are cowards", "yoruba cowards", "yoruba traitors"],
        ),
        TermPattern::new(
            "igbo",
            E,
            &["igbo culture", "igbo language", "igbo people", "igbo traders", "igbo festival", "igbo heritage", "speaks igbo", "in igbo"],
            &["igbo domination", "greedy igbo", "igbo are greedy", "igbo are fraudsters", "igbo fraudsters"],
        ),
        TermPattern::new(
            "hausa",
            E,
            &["hausa language", "hausa culture", "hausa people", "hausa films", "hausa service", "speaks hausa", "in hausa"],
            &["hausa domination", "hausa are lazy", "lazy hausa", "hausa invaders"],
        ),
        TermPattern::new(
            "fulani",
            E,
            &["fulani herders", "fulani culture", "fulani people", "fulani language"],
            &["fulani terrorists", "fulani invaders", "fulani killers", "fulani domination", "fulanization"],
        ),
        TermPattern::new(
            "ijaw",
            E,
            &["ijaw people", "ijaw youths", "ijaw culture", "ijaw national congress"],
            &["violent ijaw", "ijaw militants are"],
        ),
        TermPattern::new("kanuri", E, &["kanuri people", "kanuri language", "kanuri culture"], &[]),
        TermPattern::new("tiv", E, &["tiv people", "tiv language", "tiv culture"], &[]),
        TermPattern::new("edo", E, &["edo state", "edo people", "edo language", "edo culture"], &[]),
        TermPattern::new("efik", E, &["efik people", "efik language", "efik culture"], &[]),
        TermPattern::slur("aboki", E),
        TermPattern::slur("nyamiri", E),
        TermPattern::slur("gambari", E),
        TermPattern::slur("omo ale", E),
    ]
}

fn religious() -> Vec<TermPattern> {
    use BiasCategory::Religious as R;
    vec![
        TermPattern::new(
            "christian",
            R,
            &["christian community", "christian association", "christian faith", "christian leaders", "christian association of nigeria"],
            &["christian infidels", "christians are the enemy", "christian crusaders", "kill christians"],
        ),
        TermPattern::new(
            "muslim",
            R,
            &["muslim community", "muslim faithful", "muslim leaders", "muslim ummah", "muslim council"],
            &["muslim terrorists", "muslims are terrorists", "muslim invaders", "kill muslims"],
        ),
        TermPattern::new("catholic", R, &["catholic church", "catholic bishops", "catholic diocese"], &[]),
        TermPattern::new("pentecostal", R, &["pentecostal church", "pentecostal fellowship"], &[]),
        TermPattern::new("orthodox", R, &["orthodox church", "orthodox christians"], &[]),
        TermPattern::new("sunni", R, &["sunni muslims", "sunni community"], &[]),
        TermPattern::new("shia", R, &["shia muslims", "shia community"], &[]),
        TermPattern::new("sharia", R, &["sharia law", "sharia court"], &["sharia agenda", "impose sharia"]),
        TermPattern::new("jihad", R, &["jihad of 1804", "usman dan fodio"], &["jihad against", "violent jihad"]),
        TermPattern::new(
            "crusade",
            R,
            &["crusade ground", "gospel crusade", "crusade meeting"],
            &["crusade against muslims", "christian crusade against"],
        ),
        TermPattern::new("jihadist", R, &[], &["jihadist government", "jihadist agenda"]),
        TermPattern::new("crusader", R, &[], &["crusader government", "crusader agenda"]),
        TermPattern::new("fundamentalist", R, &[], &["fundamentalist muslims", "fundamentalist christians"]),
        TermPattern::new("pagan", R, &[], &["pagan tribes", "pagans must"]),
        TermPattern::new("christmas", R, &["merry christmas", "christmas celebration", "christmas day"], &[]),
        TermPattern::new("eid", R, &["eid celebration", "eid al", "eid mubarak"], &[]),
        TermPattern::new("persecution", R, &["reports of persecution", "persecution report"], &[]),
        TermPattern::slur("infidel", R),
        TermPattern::slur("kafir", R),
    ]
}

fn regional() -> Vec<TermPattern> {
    use BiasCategory::Regional as G;
    vec![
        TermPattern::new(
            "north",
            G,
            &["north central", "north east", "north west", "north-east", "north-west", "north-central", "in the north"],
            &["the north is backward", "north born to rule"],
        ),
        TermPattern::new(
            "south",
            G,
            &["south west", "south east", "south south", "south-west", "south-east", "in the south"],
            &["the south is ungrateful", "southern agenda"],
        ),
        TermPattern::new("middle belt", G, &["middle belt forum", "middle belt region"], &[]),
        TermPattern::new("core north", G, &[], &["core north agenda", "core north domination"]),
        TermPattern::new(
            "arewa",
            G,
            &["arewa consultative forum", "arewa youths", "arewa house"],
            &["arewa agenda", "arewa must rule"],
        ),
        TermPattern::new(
            "biafra",
            G,
            &["biafran war", "nigerian civil war", "biafra war", "biafra remembrance"],
            &["biafra or death", "destroy biafra"],
        ),
        TermPattern::new("northerner", G, &[], &["lazy northerner", "northerner is lazy"]),
        TermPattern::new("northerners", G, &[], &["northerners are lazy", "lazy northerners"]),
        TermPattern::new("southerner", G, &[], &["greedy southerner", "southerner is greedy"]),
        TermPattern::new("southerners", G, &[], &["southerners are greedy", "greedy southerners"]),
    ]
}
