use serde::{Deserialize, Serialize};

/// Region codes accepted for venue and artist locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL, GA, HI, ID, IL, IN, IA, KS, KY, LA, ME, MT, NE, NV,
    NH, NJ, NM, NY, NC, ND, OH, OK, OR, MD, MA, MI, MN, MS, MO, PA, RI, SC, SD, TN, TX, UT, VT,
    VA, WA, WV, WI, WY,
}

impl State {
    pub const ALL: [State; 51] = [
        Self::AL, Self::AK, Self::AZ, Self::AR, Self::CA, Self::CO, Self::CT, Self::DE, Self::DC,
        Self::FL, Self::GA, Self::HI, Self::ID, Self::IL, Self::IN, Self::IA, Self::KS, Self::KY,
        Self::LA, Self::ME, Self::MT, Self::NE, Self::NV, Self::NH, Self::NJ, Self::NM, Self::NY,
        Self::NC, Self::ND, Self::OH, Self::OK, Self::OR, Self::MD, Self::MA, Self::MI, Self::MN,
        Self::MS, Self::MO, Self::PA, Self::RI, Self::SC, Self::SD, Self::TN, Self::TX, Self::UT,
        Self::VT, Self::VA, Self::WA, Self::WV, Self::WI, Self::WY,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::AL => "AL",
            Self::AK => "AK",
            Self::AZ => "AZ",
            Self::AR => "AR",
            Self::CA => "CA",
            Self::CO => "CO",
            Self::CT => "CT",
            Self::DE => "DE",
            Self::DC => "DC",
            Self::FL => "FL",
            Self::GA => "GA",
            Self::HI => "HI",
            Self::ID => "ID",
            Self::IL => "IL",
            Self::IN => "IN",
            Self::IA => "IA",
            Self::KS => "KS",
            Self::KY => "KY",
            Self::LA => "LA",
            Self::ME => "ME",
            Self::MT => "MT",
            Self::NE => "NE",
            Self::NV => "NV",
            Self::NH => "NH",
            Self::NJ => "NJ",
            Self::NM => "NM",
            Self::NY => "NY",
            Self::NC => "NC",
            Self::ND => "ND",
            Self::OH => "OH",
            Self::OK => "OK",
            Self::OR => "OR",
            Self::MD => "MD",
            Self::MA => "MA",
            Self::MI => "MI",
            Self::MN => "MN",
            Self::MS => "MS",
            Self::MO => "MO",
            Self::PA => "PA",
            Self::RI => "RI",
            Self::SC => "SC",
            Self::SD => "SD",
            Self::TN => "TN",
            Self::TX => "TX",
            Self::UT => "UT",
            Self::VT => "VT",
            Self::VA => "VA",
            Self::WA => "WA",
            Self::WV => "WV",
            Self::WI => "WI",
            Self::WY => "WY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }
}

impl From<State> for String {
    fn from(state: State) -> String {
        state.as_str().to_string()
    }
}

/// Fixed set of genre tags a venue or artist may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RnB,
    Reggae,
    RockNRoll,
    Soul,
    Swing,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 20] = [
        Self::Alternative,
        Self::Blues,
        Self::Classical,
        Self::Country,
        Self::Electronic,
        Self::Folk,
        Self::Funk,
        Self::HipHop,
        Self::HeavyMetal,
        Self::Instrumental,
        Self::Jazz,
        Self::MusicalTheatre,
        Self::Pop,
        Self::Punk,
        Self::RnB,
        Self::Reggae,
        Self::RockNRoll,
        Self::Soul,
        Self::Swing,
        Self::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RnB => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Swing => "Swing",
            Self::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.as_str() == s)
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> String {
        genre.as_str().to_string()
    }
}
