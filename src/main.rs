use std::env;
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;

use immortal_path::components::cultivator::StatBlock;
use immortal_path::rules::stats::StatKind;
use immortal_path::simulation::creation::{
    random_name, randomize_stats, validate_allocation, CREATION_BASE_STAT, CREATION_POINTS,
    CREATION_STAT_MAX, CREATION_STAT_MIN,
};
use immortal_path::simulation::log::LogKind;
use immortal_path::{ActionKind, CharacterSpec, Game, Snapshot};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = parse_seed(env::args().collect());
    println!("===== 文字修仙 =====");
    println!("(seed: {})", seed);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let spec = match create_character(&mut lines) {
        Some(spec) => spec,
        None => return,
    };

    let mut game = match Game::new(seed, spec) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("character creation rejected: {}", err);
            std::process::exit(1);
        }
    };

    let mut shown_logs = 0;
    let mut snapshot = game.snapshot();
    render_status(&snapshot);
    shown_logs = render_new_logs(&snapshot, shown_logs);

    loop {
        if let Some(event) = &snapshot.pending_event {
            println!();
            println!("【{}】{}", event.title, event.desc);
            for (i, option) in event.options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let Some(line) = prompt(&mut lines, "选择 > ") else {
                break;
            };
            let Ok(choice) = line.trim().parse::<usize>() else {
                continue;
            };
            if choice == 0 || choice > event.options.len() {
                continue;
            }
            snapshot = game.choose_option(choice - 1);
            shown_logs = render_new_logs(&snapshot, shown_logs);
            continue;
        }

        if snapshot.turn_over {
            // The pause the browser build fakes with a timer: one key
            // before the season turns.
            let _ = prompt(&mut lines, "-- 本季行动已毕，回车进入下一季 --");
            snapshot = game.advance_quarter();
            render_status(&snapshot);
            shown_logs = render_new_logs(&snapshot, shown_logs);
            continue;
        }

        println!();
        println!("行动 ({}点剩余): 1.闭关 2.历练 3.访友 4.参悟 5.玩乐 6.寻道侣 s.状态 q.退出", snapshot.action_points);
        let Some(line) = prompt(&mut lines, "> ") else {
            break;
        };
        let choice = line.trim();
        let kind = match choice {
            "1" => Some(ActionKind::Retreat),
            "2" => Some(ActionKind::Adventure),
            "3" => Some(ActionKind::Visit),
            "4" => Some(ActionKind::Comprehend),
            "5" => Some(ActionKind::Play),
            "6" => Some(ActionKind::Date),
            "s" => {
                render_status(&snapshot);
                None
            }
            "q" => break,
            _ => None,
        };
        if let Some(kind) = kind {
            snapshot = game.act(kind);
            shown_logs = render_new_logs(&snapshot, shown_logs);
        }
    }

    println!("道友慢走。");
}

fn parse_seed(args: Vec<String>) -> u64 {
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            if let Some(value) = iter.next() {
                if let Ok(seed) = value.parse() {
                    return seed;
                }
                eprintln!("--seed expects a number, ignoring {}", value);
            }
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Option<String> {
    print!("{}", text);
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line),
        _ => None,
    }
}

const ALLOC_STATS: [(StatKind, &str); 5] = [
    (StatKind::Con, "con"),
    (StatKind::Root, "root"),
    (StatKind::Spirit, "spirit"),
    (StatKind::Luck, "luck"),
    (StatKind::Speed, "speed"),
];

fn create_character(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<CharacterSpec> {
    println!();
    let name_input = prompt(lines, "道号 (留空随缘, r=随机): ")?;
    let name = match name_input.trim() {
        "r" => random_name(&mut rand::thread_rng()).to_string(),
        other => other.to_string(),
    };

    let mut stats = StatBlock::uniform(CREATION_BASE_STAT);
    loop {
        let spent = stats.total() - CREATION_BASE_STAT * 5;
        let remaining = CREATION_POINTS - spent;
        println!();
        println!(
            "分配属性点 (剩余 {} 点, 每项 {}-{}):",
            remaining, CREATION_STAT_MIN, CREATION_STAT_MAX
        );
        for (kind, key) in ALLOC_STATS {
            println!("  {} ({}): {}", kind.display_name(), key, stats.get(kind));
        }
        println!("指令: +con/-con 等, random=随机分配, done=完成");
        let line = prompt(lines, "> ")?;
        let command = line.trim();

        match command {
            "done" => {
                if validate_allocation(&stats).is_ok() {
                    break;
                }
                println!("请将属性点分配完毕！");
            }
            "random" => {
                stats = randomize_stats(&mut rand::thread_rng());
            }
            _ => {
                let Some(sign) = command.chars().next() else {
                    continue;
                };
                if sign != '+' && sign != '-' {
                    continue;
                }
                let key = &command[1..];
                let Some(&(kind, _)) = ALLOC_STATS.iter().find(|(_, k)| *k == key) else {
                    continue;
                };
                match sign {
                    '+' if remaining > 0 && stats.get(kind) < CREATION_STAT_MAX => {
                        stats.apply(kind, 1);
                    }
                    '-' if stats.get(kind) > CREATION_STAT_MIN => {
                        stats.apply(kind, -1);
                    }
                    _ => {}
                }
            }
        }
    }

    Some(CharacterSpec { name, stats })
}

fn render_status(snapshot: &Snapshot) {
    println!();
    println!(
        "【{}】{} | {}岁 | 灵根: {}",
        snapshot.name, snapshot.realm_name, snapshot.age_years, snapshot.spirit_root_name
    );
    println!(
        "灵气 {:.0}/{:.0} | 第{}年 {}季 | 行动点 {}",
        snapshot.current_qi, snapshot.max_qi, snapshot.year, snapshot.season, snapshot.action_points
    );
    let stats = &snapshot.stats;
    println!(
        "体魄{} 根骨{} 灵力{} 福运{} 速度{}",
        stats.con, stats.root, stats.spirit, stats.luck, stats.speed
    );
    let derived = &snapshot.derived;
    println!(
        "气血{} 防御{} 攻击{} 暴击{:.1}% 身法{} 修炼速度{}/季",
        derived.max_hp,
        derived.defense,
        derived.attack,
        derived.crit_rate,
        derived.combat_speed,
        derived.cultivation_speed
    );
}

fn render_new_logs(snapshot: &Snapshot, shown: usize) -> usize {
    for entry in snapshot.log.iter().skip(shown) {
        let tag = match entry.kind {
            LogKind::System => "系",
            LogKind::Gain => "得",
            LogKind::Event => "事",
            LogKind::Combat => "战",
            LogKind::Plain => "记",
        };
        println!(
            "[{}年{} {}] {}",
            entry.year,
            season_name(entry.quarter),
            tag,
            entry.text
        );
    }
    snapshot.log.len()
}

fn season_name(quarter: u8) -> &'static str {
    immortal_path::data::constants::SEASONS[quarter as usize % 4]
}
