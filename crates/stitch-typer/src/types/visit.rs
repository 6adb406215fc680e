use std::ops::ControlFlow;

use super::{ArrowType, ProductType, Type, TypeVar};

pub trait TypeVisitor: Sized {
    type BreakValue;

    fn visit_unit(&mut self) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }

    fn visit_arrow(&mut self, arrow: &ArrowType) -> ControlFlow<Self::BreakValue> {
        self.visit_type(&arrow.domain)?;
        self.visit_type(&arrow.codomain)?;
        ControlFlow::Continue(())
    }

    fn visit_product(&mut self, product: &ProductType) -> ControlFlow<Self::BreakValue> {
        self.visit_type(&product.first)?;
        self.visit_type(&product.second)?;
        ControlFlow::Continue(())
    }

    fn visit_type(&mut self, ty: &Type) -> ControlFlow<Self::BreakValue> {
        match ty {
            Type::Unit => self.visit_unit(),
            Type::Var(v) => self.visit_var(v),
            Type::Arrow(a) => self.visit_arrow(a),
            Type::Product(p) => self.visit_product(p),
        }
    }

    fn visit_var(&mut self, _var: &TypeVar) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }
}

pub trait TypeVisitorMut: Sized {
    type BreakValue;

    fn visit_arrow_mut(&mut self, arrow: &mut ArrowType) -> ControlFlow<Self::BreakValue> {
        self.visit_type_mut(&mut arrow.domain)?;
        self.visit_type_mut(&mut arrow.codomain)?;
        ControlFlow::Continue(())
    }

    fn visit_product_mut(&mut self, product: &mut ProductType) -> ControlFlow<Self::BreakValue> {
        self.visit_type_mut(&mut product.first)?;
        self.visit_type_mut(&mut product.second)?;
        ControlFlow::Continue(())
    }

    fn visit_type_mut(&mut self, ty: &mut Type) -> ControlFlow<Self::BreakValue> {
        match ty {
            Type::Unit => ControlFlow::Continue(()),
            Type::Var(v) => self.visit_var_mut(v),
            Type::Arrow(a) => self.visit_arrow_mut(a),
            Type::Product(p) => self.visit_product_mut(p),
        }
    }

    fn visit_var_mut(&mut self, _var: &mut TypeVar) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }
}

pub trait TypeVisitable {
    fn visit_type_by<V>(&self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitor;

    fn visit_type_mut_by<V>(&mut self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitorMut;
}

impl TypeVisitable for Type {
    fn visit_type_by<V>(&self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitor,
    {
        visitor.visit_type(self)
    }

    fn visit_type_mut_by<V>(&mut self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitorMut,
    {
        visitor.visit_type_mut(self)
    }
}
