//! Interactive session: registration prompts and the per-turn menu loop.
//!
//! All decision logic lives in `warsim-core`; this module only collects
//! input, renders engine results, and aborts invalid selections with the
//! engine's own error messages. Generic over reader/writer so tests can
//! drive a full session from a byte buffer.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use warsim_core::{
    assign_mission, attack, check_victory, CombatWinner, GameState, Player, Territory,
};

/// Run a complete session: registration, then the menu loop until quit or
/// end of input. Returns the final state for optional snapshot dumping.
pub fn run(seed: u64, input: &mut impl BufRead, output: &mut impl Write) -> Result<GameState> {
    let mut state = GameState::new(seed);

    writeln!(output, "========================================")?;
    writeln!(output, "   WARSIM - STRATEGIC MISSIONS")?;
    writeln!(output, "========================================")?;

    register_players(&mut state, input, output)?;
    register_territories(&mut state, input, output)?;
    menu_loop(&mut state, input, output)?;

    Ok(state)
}

fn register_players(
    state: &mut GameState,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    writeln!(output, "\n=== Player registration ===")?;
    let count = prompt_count(input, output, "How many players? ")?;

    for i in 0..count {
        writeln!(output, "--- Player {} ---", i + 1)?;
        let name = prompt_line(input, output, "Name: ")?;
        let faction = prompt_line(input, output, "Faction color: ")?;
        let mission = assign_mission(&mut state.rng);

        writeln!(output, "Mission for {}: {}", name, mission.description)?;

        state.players.push(Player {
            name,
            faction,
            mission,
        });
    }

    Ok(())
}

fn register_territories(
    state: &mut GameState,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    writeln!(output, "\n=== Territory registration ===")?;
    let count = prompt_count(input, output, "How many territories? ")?;

    for i in 0..count {
        writeln!(output, "--- Territory {} ---", i + 1)?;
        let name = prompt_line(input, output, "Name: ")?;
        let faction = prompt_line(input, output, "Controlling faction: ")?;
        let troops = prompt_number(input, output, "Troops: ")?;

        state.territories.push(Territory::new(name, faction, troops));
    }

    Ok(())
}

fn menu_loop(
    state: &mut GameState,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    loop {
        writeln!(output, "\n========================================")?;
        writeln!(output, "        MAIN MENU - TURN {}", state.turn)?;
        writeln!(output, "========================================")?;
        writeln!(output, "1. List territories")?;
        writeln!(output, "2. Show player missions")?;
        writeln!(output, "3. Attack")?;
        writeln!(output, "4. Check victory")?;
        writeln!(output, "5. Quit")?;
        write!(output, "Choose an option: ")?;
        output.flush()?;

        // End of input is treated as quitting, so piped scripts terminate
        // cleanly.
        let choice = match read_line(input)? {
            Some(line) => line,
            None => break,
        };

        match choice.trim() {
            "1" => list_territories(state, output)?,
            "2" => show_missions(state, output)?,
            "3" => run_attack(state, input, output)?,
            "4" => report_victory(state, output)?,
            "5" => break,
            other => writeln!(output, "Invalid option '{}'. Try again.", other)?,
        }
    }

    writeln!(output, "\nGoodbye!")?;
    Ok(())
}

fn list_territories(state: &GameState, output: &mut impl Write) -> Result<()> {
    writeln!(output, "\nTerritories:")?;
    for (i, t) in state.territories.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} ({}) - {} troops",
            i + 1,
            t.name,
            t.faction,
            t.troops
        )?;
    }
    Ok(())
}

fn show_missions(state: &GameState, output: &mut impl Write) -> Result<()> {
    writeln!(output, "\nPlayer missions:")?;
    for p in &state.players {
        writeln!(output, "  {} ({}): {}", p.name, p.faction, p.mission.description)?;
    }
    Ok(())
}

fn run_attack(
    state: &mut GameState,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    list_territories(state, output)?;

    let attacker = prompt_number(input, output, "Attacker territory number: ")? as usize;
    let defender = prompt_number(input, output, "Defender territory number: ")? as usize;
    if attacker == 0 || defender == 0 {
        writeln!(output, "Territory numbers start at 1.")?;
        return Ok(());
    }

    // The engine validates the selection; a rejection leaves the state
    // untouched.
    let outcome = match attack(state, attacker - 1, defender - 1) {
        Ok(outcome) => outcome,
        Err(err) => {
            writeln!(output, "Attack rejected: {}", err)?;
            return Ok(());
        }
    };

    writeln!(
        output,
        "\nAttacker rolled {}, defender rolled {}.",
        outcome.attacker_roll, outcome.defender_roll
    )?;
    match outcome.winner {
        CombatWinner::Attacker => {
            let defender_name = &state.territories[defender - 1].name;
            writeln!(
                output,
                "{} conquered! {} troops moved in.",
                defender_name, outcome.troops_transferred
            )?;
        }
        CombatWinner::Defender => {
            writeln!(output, "The attack was repelled. The attacker lost 1 troop.")?;
        }
    }
    writeln!(
        output,
        "{}: {} troops ({}) | {}: {} troops ({})",
        state.territories[attacker - 1].name,
        outcome.attacker_troops,
        state.territories[attacker - 1].faction,
        state.territories[defender - 1].name,
        outcome.defender_troops,
        state.territories[defender - 1].faction,
    )?;

    // Victory is re-checked automatically after every attack.
    report_victory(state, output)
}

fn report_victory(state: &GameState, output: &mut impl Write) -> Result<()> {
    writeln!(output, "\n=== Victory check ===")?;

    let results = check_victory(&state.players, &state.territories);
    let mut any = false;
    for status in &results {
        if status.satisfied {
            let p = &state.players[status.player];
            writeln!(
                output,
                "*** {} ({}) has completed their mission: {} ***",
                p.name, p.faction, p.mission.description
            )?;
            any = true;
        }
    }
    if !any {
        writeln!(output, "No player has completed their mission yet.")?;
    }

    Ok(())
}

// ============================================================================
// Input helpers
// ============================================================================

/// Read one line, trimmed. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until a non-empty line arrives.
fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<String> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;
        match read_line(input)? {
            Some(line) if !line.is_empty() => return Ok(line),
            Some(_) => writeln!(output, "Please enter a value.")?,
            None => bail!("unexpected end of input"),
        }
    }
}

/// Prompt until the line parses as a non-negative integer.
fn prompt_number(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<u32> {
    loop {
        let line = prompt_line(input, output, prompt)?;
        match line.parse::<u32>() {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(output, "'{}' is not a number. Try again.", line)?,
        }
    }
}

/// Prompt for a count that must be at least 1.
fn prompt_count(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<u32> {
    loop {
        let n = prompt_number(input, output, prompt)?;
        if n >= 1 {
            return Ok(n);
        }
        writeln!(output, "At least 1 is required.")?;
    }
}
