//! Rule explanations shown after each play
//!
//! Keyed by [`Outcome::id`]. Every outcome either game can report has an entry.

use serde::Serialize;

use crate::sim::Outcome;

/// One rule card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub short_description: &'static str,
    pub detailed_explanation: &'static str,
    pub when_it_happens: &'static str,
    pub fun_fact: Option<&'static str>,
}

const fn rule(
    id: &'static str,
    name: &'static str,
    short_description: &'static str,
    detailed_explanation: &'static str,
    when_it_happens: &'static str,
    fun_fact: Option<&'static str>,
) -> RuleEntry {
    RuleEntry {
        id,
        name,
        short_description,
        detailed_explanation,
        when_it_happens,
        fun_fact,
    }
}

pub static RULES: &[RuleEntry] = &[
    rule(
        "single",
        "Single",
        "The batter hits the ball and reaches first base safely.",
        "A ball hit into fair territory that lets the batter reach first before the defense can put them out. Runners already on base move up.",
        "The ball gets between infielders or drops in front of an outfielder.",
        Some("Ichiro Suzuki holds the single-season hit record with 262 (2004)."),
    ),
    rule(
        "double",
        "Double",
        "The batter reaches second base on a hit.",
        "A hit deep enough that the batter can safely reach second. Runners usually advance two bases.",
        "The ball lands deep in the outfield or bounces off the wall.",
        Some("A double often scores a runner from first."),
    ),
    rule(
        "triple",
        "Triple",
        "The batter reaches third base on a hit.",
        "A hit into a corner or gap that lets the batter reach third. Every runner on base scores.",
        "The ball rolls into the corner or splits the outfielders.",
        Some("Triples are the rarest kind of hit."),
    ),
    rule(
        "homerun",
        "Home run",
        "The ball leaves the park and everyone scores.",
        "A fair ball hit over the outfield fence. The batter and every runner on base circle the bases and score.",
        "The ball clears the outfield fence in fair territory.",
        None,
    ),
    rule(
        "grandslam",
        "Grand slam",
        "A home run with the bases loaded.",
        "With runners on first, second and third, a home run scores four runs at once, the most a single swing can produce.",
        "A home run is hit while the bases are loaded.",
        Some("A walk-off grand slam is one of the rarest finishes in baseball."),
    ),
    rule(
        "strike",
        "Strike",
        "A swing and a miss, or a hittable pitch not swung at.",
        "A strike is called when the batter misses, takes a pitch in the strike zone, or hits a foul ball with fewer than two strikes.",
        "Swinging miss, called strike in the zone, or a foul before two strikes.",
        None,
    ),
    rule(
        "ball",
        "Ball",
        "A pitch outside the strike zone that the batter does not swing at.",
        "Four balls in one plate appearance send the batter to first base.",
        "The pitch misses the zone and the batter takes it.",
        None,
    ),
    rule(
        "walk",
        "Walk (base on balls)",
        "Ball four: the batter goes to first base.",
        "The batter is awarded first base. Runners move up only when forced; with the bases loaded, the runner on third scores.",
        "The fourth ball of a plate appearance.",
        None,
    ),
    rule(
        "strikeout",
        "Strikeout",
        "Three strikes and the batter is out.",
        "The third strike ends the plate appearance with an out, whether it is swinging or called.",
        "Any third strike.",
        None,
    ),
    rule(
        "foul",
        "Foul ball",
        "A ball hit outside the foul lines.",
        "A foul counts as a strike until the batter has two strikes. After that, fouls do not change the count, except a foul bunt.",
        "The ball is hit outside the first or third base line.",
        None,
    ),
    rule(
        "threebuntout",
        "Foul bunt with two strikes",
        "Bunting foul on two strikes is a strikeout.",
        "The usual rule that a foul cannot be strike three does not apply to bunts. A foul bunt with two strikes is strike three.",
        "The batter bunts foul with two strikes.",
        Some("That is why batters rarely bunt with two strikes."),
    ),
    rule(
        "sacrifice",
        "Sacrifice bunt",
        "The batter gives themselves up to move runners forward.",
        "The batter bunts so the defense takes the out at first while every runner advances a base.",
        "Fewer than two outs with at least one runner on base.",
        None,
    ),
    rule(
        "groundout",
        "Groundout",
        "A ground ball fielded and thrown to first in time.",
        "An infielder fields the ball on the ground and beats the batter to first base.",
        "The ball is hit on the ground to an infielder.",
        None,
    ),
    rule(
        "flyout",
        "Flyout",
        "A fly ball caught before it touches the ground.",
        "Any batted ball caught in the air retires the batter.",
        "The ball is hit in the air and caught.",
        None,
    ),
    rule(
        "doubleplay",
        "Double play",
        "Two outs on one ground ball.",
        "The defense forces the runner at second and then throws the batter out at first.",
        "A ground ball with a runner on first and fewer than two outs.",
        None,
    ),
    rule(
        "flyout_catch",
        "Fly ball catch",
        "You caught it in the air: the batter is out.",
        "Catching a batted ball before it lands is an out. Runners must return to their base before advancing.",
        "The fielder catches a fly ball.",
        None,
    ),
    rule(
        "linedrive_catch",
        "Line drive catch",
        "A hard, low liner snagged for an out.",
        "A line drive caught before it touches the ground is an out just like any fly ball.",
        "A sharply hit ball is caught on the fly.",
        None,
    ),
    rule(
        "groundball",
        "Ground ball out",
        "You fielded the grounder and threw the batter out.",
        "The fielder gathers the ground ball and throws to first before the batter arrives.",
        "A ground ball is fielded cleanly.",
        None,
    ),
    rule(
        "double_play",
        "Turning two",
        "Two outs on one ground ball.",
        "Field the grounder, force the runner at second, and relay to first to beat the batter.",
        "A ground ball with a runner on first and fewer than two outs.",
        Some("Shortstop and second baseman together are the double-play combination."),
    ),
    rule(
        "tagup",
        "Tag-up",
        "After a catch, a runner retouches their base and advances.",
        "Once a fly ball is caught, runners may advance after touching their original base. A runner on third can score this way.",
        "A deep fly ball is caught with a runner on third and fewer than two outs.",
        None,
    ),
    rule(
        "error",
        "Error",
        "A fielding mistake lets the batter reach.",
        "When a fielder misplays a ball that should have been an out, the batter reaches and runners advance. It is scored as an error, not a hit.",
        "A fumbled or misplayed ground ball.",
        None,
    ),
    rule(
        "hit_allowed",
        "Hit allowed",
        "The ground ball got through for a single.",
        "The ball could not be reached in time. The batter takes first and every runner moves up a base.",
        "A ground ball gets past the fielder.",
        None,
    ),
    rule(
        "extra_base_hit",
        "Extra-base hit",
        "The ball dropped in the outfield and runners raced around.",
        "A ball in the air that lands uncaught lets runners on second and third score while the runner from first reaches second.",
        "A fly ball or line drive lands uncaught.",
        None,
    ),
];

/// Look up the rule card for an outcome identifier
pub fn lookup(id: &str) -> Option<&'static RuleEntry> {
    RULES.iter().find(|r| r.id == id)
}

/// Rule card for an outcome
pub fn for_outcome(outcome: Outcome) -> Option<&'static RuleEntry> {
    lookup(outcome.id())
}
