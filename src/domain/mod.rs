// Domain layer - Survey data and Pareto math
pub mod dashboard;
pub mod pareto;
pub mod survey;
pub mod tally;
