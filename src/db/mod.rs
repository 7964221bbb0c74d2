pub mod investment_queries;
