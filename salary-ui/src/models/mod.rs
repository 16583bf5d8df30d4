mod pay_form;

pub use pay_form::PayFormModel;
