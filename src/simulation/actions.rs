use rand::Rng;

use crate::rules::stats::StatKind;

/// The six quarterly activities. Each costs one action point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Retreat,
    Adventure,
    Visit,
    Comprehend,
    Play,
    Date,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Retreat,
        ActionKind::Adventure,
        ActionKind::Visit,
        ActionKind::Comprehend,
        ActionKind::Play,
        ActionKind::Date,
    ];

    /// Name used when reporting the qi source.
    pub fn source_name(&self) -> &'static str {
        match self {
            ActionKind::Retreat => "闭关",
            ActionKind::Adventure => "历练",
            ActionKind::Visit => "访友",
            ActionKind::Comprehend => "参悟",
            ActionKind::Play => "玩乐",
            ActionKind::Date => "CPDD",
        }
    }
}

/// Result of rolling one activity: the qi multiplier, the narration, any
/// stat rewards, and whether the roll escalated into combat.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub qi_mult: f64,
    pub narrative: String,
    pub rewards: Vec<(StatKind, i32)>,
    pub combat: bool,
}

/// Rolls an activity. Pure apart from the injected random source; the
/// caller applies the rewards and, for adventures, resolves the combat
/// before qi settles.
pub fn roll_action(kind: ActionKind, rng: &mut impl Rng) -> ActionOutcome {
    let roll = rng.gen::<f64>();
    match kind {
        ActionKind::Retreat => {
            let mut narrative = String::from("你闭关修炼，两耳不闻窗外事。");
            let mut rewards = Vec::new();
            if roll < 0.2 {
                narrative.push_str(" 忽有感悟，灵力大增！");
                rewards.push((StatKind::Spirit, 1));
            }
            ActionOutcome {
                qi_mult: 1.2,
                narrative,
                rewards,
                combat: false,
            }
        }
        ActionKind::Adventure => {
            // Wandering pays erratically.
            let qi_mult = 0.5 + rng.gen::<f64>();
            let mut narrative = String::from("你外出历练，");
            let mut rewards = Vec::new();
            let mut combat = false;
            if roll < 0.3 {
                combat = true;
            } else if roll < 0.6 {
                narrative.push_str("误入一处荒废遗迹，寻得几株灵草。");
                rewards.push((StatKind::Con, 2));
                rewards.push((StatKind::Root, 1));
            } else {
                narrative.push_str("虽然没有大机缘，但也增长了见识。");
            }
            ActionOutcome {
                qi_mult,
                narrative,
                rewards,
                combat,
            }
        }
        ActionKind::Visit => {
            let mut narrative = String::from("你拜访了昔日道友，");
            let mut rewards = Vec::new();
            if roll < 0.4 {
                narrative.push_str("两人坐而论道，受益匪浅。");
                rewards.push((StatKind::Spirit, 1));
            } else {
                narrative.push_str("把酒言欢，心情舒畅。");
            }
            ActionOutcome {
                qi_mult: 1.0,
                narrative,
                rewards,
                combat: false,
            }
        }
        ActionKind::Comprehend => {
            let mut narrative = String::from("你观摩天地法则，");
            let mut rewards = Vec::new();
            if roll < 0.3 {
                narrative.push_str("隐约摸索到一丝大道轨迹。");
                rewards.push((StatKind::Speed, 2));
            } else {
                narrative.push_str("虽无顿悟，但也稳固了道心。");
            }
            ActionOutcome {
                qi_mult: 1.1,
                narrative,
                rewards,
                combat: false,
            }
        }
        ActionKind::Play => {
            let mut narrative = String::from("你游山玩水，");
            let mut rewards = Vec::new();
            if roll < 0.3 {
                narrative.push_str("偶遇瑞兽赐福。");
                rewards.push((StatKind::Luck, 2));
            } else {
                narrative.push_str("身心得到了极大的放松。");
            }
            ActionOutcome {
                qi_mult: 0.55,
                narrative,
                rewards,
                combat: false,
            }
        }
        ActionKind::Date => {
            let mut narrative = String::from("你尝试寻找道侣，");
            let mut rewards = Vec::new();
            if roll < 0.2 {
                narrative.push_str("遇到一位倾心之人，互赠信物。");
                rewards.push((StatKind::Luck, 1));
                rewards.push((StatKind::Spirit, 1));
            } else {
                narrative.push_str("可惜缘分未到。");
            }
            ActionOutcome {
                qi_mult: 0.55,
                narrative,
                rewards,
                combat: false,
            }
        }
    }
}
