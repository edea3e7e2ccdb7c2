use pacman_game_types::{Direction, Position, RulesError, WorldState};

/// The state's own score, what the searching agents maximize by default
pub fn score_evaluation(state: &WorldState) -> i64 {
    state.score()
}

/// Scores `action` from `current` by looking one pacman move ahead
///
/// On top of the successor's score, every remaining pellet pulls pacman towards it with
/// `1 / distance`. Ghosts add the same kind of term, but only the ones that weren't already right
/// next to pacman before he moved. Zero distances contribute nothing.
pub fn reflex_evaluation(current: &WorldState, action: Direction) -> Result<f64, RulesError> {
    let successor = current.generate_pacman_successor(action)?;
    let old_position = current.pacman_position();
    let new_position = successor.pacman_position();

    let mut score = successor.score() as f64;

    for pellet in successor.food().as_list() {
        let distance = Position::from(pellet).manhattan_distance(&new_position);
        if distance != 0.0 {
            score += 1.0 / distance;
        }
    }

    for ghost in successor.ghost_positions() {
        let distance = ghost.manhattan_distance(&new_position);
        if old_position.manhattan_distance(&ghost) > 1.0 && distance != 0.0 {
            score += 1.0 / distance;
        }
    }

    Ok(score)
}
