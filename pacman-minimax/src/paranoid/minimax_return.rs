use std::fmt::Debug;
use text_trees::StringTreeNode;

#[derive(Debug, Clone, PartialEq, Eq)]
/// This is returned from [crate::paranoid::MinimaxSearch::single_minimax]
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<Action, ScoreType>
where
    Action: Copy + Debug + PartialEq,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// A 'recursive' look at all the actions under us
        /// This array is sorted by the score of the action, best first for whoever is moving.
        /// Equal scores keep the order the actions were generated in, so the first element is
        /// always the chosen action at this node
        options: Vec<(Action, Self)>,
        /// Which agent was moving at this node
        moving_agent: usize,
        /// The chosen score
        /// This should always match the score of the first element in `options`
        score: ScoreType,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a finished game, the maximum depth,
    /// or an agent with nothing it can do
    Leaf {
        #[allow(missing_docs)]
        score: ScoreType,
    },
}

impl<Action, ScoreType> MinMaxReturn<Action, ScoreType>
where
    Action: Copy + Debug + PartialEq,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Returns the score for this node
    pub fn score(&self) -> &ScoreType {
        match self {
            MinMaxReturn::Node { score, .. } => score,
            MinMaxReturn::Leaf { score } => score,
        }
    }

    /// Returns the action agent 0 should take to maximize the score
    /// If we are a leaf node, this will return None
    ///
    /// We take advantage of the fact that the options are sorted by score, so we can just return
    /// the first option where agent 0 is moving
    pub fn best_action(&self) -> Option<Action> {
        self.first_options_for_agent(0)
            .and_then(|options| options.first().map(|x| x.0))
    }

    /// Return the first set of action options for the given agent along the chosen route
    pub fn first_options_for_agent(&self, agent_index: usize) -> Option<&Vec<(Action, Self)>> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_agent,
                options,
                ..
            } => {
                if *moving_agent == agent_index {
                    Some(options)
                } else {
                    let chosen = options.first()?;
                    chosen.1.first_options_for_agent(agent_index)
                }
            }
        }
    }

    /// Returns all the actions in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows each of the actions we and our opponents took
    /// during the simulation
    pub fn chosen_route(&self) -> Vec<(usize, Action)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_agent,
                options,
                ..
            } => {
                if let Some(chosen) = options.first() {
                    let mut tail = chosen.1.chosen_route();
                    tail.insert(0, (*moving_agent, chosen.0));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// How many nodes, leaves included, the search visited to build this tree
    pub fn node_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                1 + options.iter().map(|(_, r)| r.node_count()).sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the chosen score, the moving agent and the chosen action at each level
    pub fn to_text_tree(&self) -> Option<String> {
        let tree_node = self.to_text_tree_node("".to_owned())?;
        Some(format!("{}", tree_node))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_agent,
                options,
                score,
                ..
            } => {
                let mut node = StringTreeNode::new(format!("{} {:?}", label, score));
                for (action, result) in options {
                    if let Some(next_node) =
                        result.to_text_tree_node(format!("{:?} {}", action, moving_agent))
                    {
                        node.push_node(next_node);
                    }
                }

                Some(node)
            }
        }
    }
}
