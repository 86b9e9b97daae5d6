//! Closed value sets of the event spreadsheet.
//!
//! The display form of every variant is the literal stored in the index, so it
//! must not change. Parsing accepts that literal or a short search alias,
//! ignoring ASCII case.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum AgeGroup {
    #[strum(to_string = "Kids only (12 and under)", serialize = "kids")]
    Kids,
    #[strum(to_string = "Everyone (6+)", serialize = "everyone")]
    Everyone,
    #[strum(to_string = "Teen (13+)", serialize = "teen")]
    Teen,
    #[strum(to_string = "Mature (18+)", serialize = "mature")]
    Mature,
    #[strum(to_string = "21+", serialize = "drinking")]
    Drinking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum EventType {
    #[strum(to_string = "SEM - Seminar", serialize = "SEM")]
    Sem,
    #[strum(to_string = "ZED - Isle of Misfit Events", serialize = "ZED")]
    Zed,
    #[strum(to_string = "ENT - Entertainment Events", serialize = "ENT")]
    Ent,
    #[strum(to_string = "RPG - Role Playing Game", serialize = "RPG")]
    Rpg,
    #[strum(to_string = "BGM - Board Game", serialize = "BGM")]
    Bgm,
    #[strum(to_string = "CGM - Non-Collectible / Tradable Card Game", serialize = "CGM")]
    Cgm,
    #[strum(to_string = "WKS - Workshop", serialize = "WKS")]
    Wks,
    #[strum(to_string = "MHE - Miniature Hobby Events", serialize = "MHE")]
    Mhe,
    #[strum(to_string = "LRP - LARP", serialize = "LRP")]
    Lrp,
    #[strum(to_string = "TRD - Trade Day Event", serialize = "TRD")]
    Trd,
    #[strum(to_string = "HMN - Historical Miniatures", serialize = "HMN")]
    Hmn,
    #[strum(to_string = "NMN - Non-Historical Miniatures", serialize = "NMN")]
    Nmn,
    #[strum(to_string = "TCG - Tradable Card Game", serialize = "TCG")]
    Tcg,
    #[strum(to_string = "FLM - Film Fest", serialize = "FLM")]
    Flm,
    #[strum(to_string = "KID - Kids Activities", serialize = "KID")]
    Kid,
    #[strum(to_string = "ANI - Anime Activities", serialize = "ANI")]
    Ani,
}

/// Experience a player needs with the game system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Experience {
    #[strum(
        to_string = "None (You've never played before - rules will be taught)",
        serialize = "none"
    )]
    Novice,
    #[strum(
        to_string = "Some (You've played it a bit and understand the basics)",
        serialize = "some"
    )]
    Familiar,
    #[strum(
        to_string = "Expert (You play it regularly and know all the rules)",
        serialize = "expert"
    )]
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Registration {
    #[strum(
        to_string = "Yes, they can register for this round without having played in any other events",
        serialize = "open"
    )]
    Open,
    #[strum(to_string = "No, this event does not require tickets!", serialize = "free")]
    Free,
    #[strum(to_string = "VIG-only!", serialize = "vig")]
    Vig,
    #[strum(to_string = "No, this event is invite-only.", serialize = "invite")]
    Invite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(to_string = "None", serialize = "none")]
    Standard,
    #[strum(to_string = "Gen Con presents", serialize = "official")]
    Official,
    #[strum(to_string = "Premier Event", serialize = "premier")]
    Premier,
}

macro_rules! serde_as_literal {
    ($($ty:ident),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(|_| {
                        de::Error::custom(format!("invalid {} '{}'", stringify!($ty), s))
                    })
                }
            }
        )*
    };
}

serde_as_literal!(AgeGroup, EventType, Experience, Registration, Category);
