//! Publishing-platform corpus: Posit Connect deployment guidance and starter code.
//!
//! Entry order is significant: the classifier's direct-key tier walks it top to bottom.

pub(crate) const ENTRIES: &[(&str, &str)] = &[
    (
        "posit_connect_overview",
        "Posit Connect is a publishing platform for data science teams that allows you to deploy and share R and Python content including Shiny apps, R Markdown documents, Jupyter notebooks, APIs, dashboards, and more. It provides enterprise-grade security, scalability, and content management for government departments.",
    ),
    (
        "python_best_practices",
        "For Python development in government departments: Use virtual environments, follow PEP 8 style guide, implement proper error handling, use type hints for better code documentation, and ensure secure coding practices. Popular libraries include pandas for data manipulation, matplotlib/plotly for visualization, and FastAPI for building APIs.",
    ),
    (
        "r_best_practices",
        "R best practices for government data analysis: Use the tidyverse for data manipulation (dplyr, ggplot2), implement reproducible workflows with R Markdown, use version control with Git, follow consistent naming conventions, and document your functions properly. Consider using shiny for interactive applications and plumber for APIs.",
    ),
    (
        "shiny_app_code",
        r#"Here's a basic Shiny application structure for Posit Connect:

# app.R
library(shiny)
library(ggplot2)
library(dplyr)

ui <- fluidPage(
  titlePanel("Government Data Dashboard"),
  
  sidebarLayout(
    sidebarPanel(
      selectInput("variable", "Choose a variable:",
                  choices = c("Population", "GDP", "Employment")),
      dateRangeInput("dates", "Date range:",
                     start = "2020-01-01", end = Sys.Date())
    ),
    
    mainPanel(
      plotOutput("mainPlot"),
      tableOutput("dataTable")
    )
  )
)

server <- function(input, output) {
  output$mainPlot <- renderPlot({
    # Your plotting code here
  })
  
  output$dataTable <- renderTable({
    # Your data processing code here
  })
}

shinyApp(ui = ui, server = server)"#,
    ),
    (
        "python_dashboard_code",
        r#"Python dashboard example using Streamlit for Posit Connect:

import streamlit as st
import pandas as pd
import plotly.express as px
import plotly.graph_objects as go

# Configuration
st.set_page_config(
    page_title="Government Data Dashboard",
    page_icon="📊",
    layout="wide"
)

# Main dashboard
st.title("Government Data Analysis Dashboard")
st.markdown("---")

# Sidebar for controls
st.sidebar.header("Dashboard Controls")
department = st.sidebar.selectbox(
    "Select Department:",
    ["Department A", "Department B", "Department C", "Department D"]
)

date_range = st.sidebar.date_input(
    "Select Date Range:",
    value=[pd.to_datetime("2023-01-01"), pd.to_datetime("2024-01-01")]
)

# Main content
col1, col2 = st.columns(2)

with col1:
    st.subheader("Key Metrics")
    # Add your metrics here
    
with col2:
    st.subheader("Trend Analysis")
    # Add your charts here"#,
    ),
    (
        "r_markdown_code",
        r#"R Markdown template for government reports:

---
title: "Government Data Analysis Report"
author: "Data Analysis Team"
date: "`r Sys.Date()`"
output: 
  html_document:
    theme: united
    toc: true
    toc_float: true
    code_folding: hide
---

```{r setup, include=FALSE}
knitr::opts_chunk$set(echo = TRUE, warning = FALSE, message = FALSE)

# Load required libraries
library(tidyverse)
library(knitr)
library(DT)
library(plotly)
```

## Executive Summary

Brief overview of findings and recommendations.

## Data Analysis

```{r data-analysis}
# Load and process your data
data <- read.csv("your_data.csv")

# Create visualizations
p <- ggplot(data, aes(x = variable1, y = variable2)) +
  geom_point() +
  theme_minimal() +
  labs(title = "Analysis Results")

ggplotly(p)
```

## Conclusions

Key findings and next steps."#,
    ),
    (
        "api_deployment_code",
        r#"Example API deployment for Posit Connect using plumber (R):

# plumber.R
library(plumber)
library(jsonlite)

#* @apiTitle Government Data API
#* @apiDescription API for accessing government datasets

#* Get department statistics
#* @param department The government department
#* @param year The year for data
#* @get /stats
function(department, year = 2024) {
  # Your data processing logic here
  result <- list(
    department = department,
    year = as.numeric(year),
    total_budget = 1000000,
    staff_count = 500
  )
  
  return(result)
}

#* Health check endpoint
#* @get /health
function() {
  list(status = "healthy", timestamp = Sys.time())
}

# To deploy: Save as plumber.R and publish to Posit Connect"#,
    ),
];
