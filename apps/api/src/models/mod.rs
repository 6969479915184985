pub mod learner;
